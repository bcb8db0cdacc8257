pub mod accrue_interest;
pub mod collateral;
pub mod composed;
pub mod deposit;
pub mod deposit_account;
pub mod depositor;
pub mod diagnostics;
pub mod dummy_cpi;
pub mod loan;
pub mod obligation;
pub mod refresh_reserve;
pub mod withdraw;

pub use accrue_interest::*;
pub use collateral::*;
pub use composed::*;
pub use deposit::*;
pub use deposit_account::*;
pub use depositor::*;
pub use diagnostics::*;
pub use dummy_cpi::*;
pub use loan::*;
pub use obligation::*;
pub use refresh_reserve::*;
pub use withdraw::*;
