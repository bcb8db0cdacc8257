//! Deployment-specific addresses of the lending program and its well-known accounts.
//!
//! The compiled network is picked by the `devnet` cargo feature; every address stays reachable
//! per [`Network`] so off-chain tooling can address either deployment from one build.
use anchor_lang::prelude::*;

// 8bpiM4yhcLYMSeCBTVFWisneXPQQWPYSA5ZpMm4DKAgT
const DEVNET_LENDING_PROGRAM: Pubkey = Pubkey::new_from_array([
    112, 237, 129, 78, 32, 15, 253, 172, 245, 42, 196, 252, 79, 171, 212, 165,
    14, 54, 30, 249, 95, 231, 182, 110, 111, 70, 199, 51, 243, 155, 111, 164,
]);

// PLENDj46Y4hhqitNV2WqLqGLrWKAaH2xJHm2UyHgJLY
const MAINNET_LENDING_PROGRAM: Pubkey = Pubkey::new_from_array([
    5, 184, 133, 144, 91, 26, 87, 101, 71, 113, 6, 30, 58, 12, 238, 218,
    104, 189, 184, 52, 168, 76, 56, 82, 8, 192, 3, 110, 196, 46, 215, 41,
]);

// 5QkMERuZEUP4XPP598z2dNPSZeupR8cNi3kyzvs6mbSb
const DEVNET_MAIN_MARKET: Pubkey = Pubkey::new_from_array([
    65, 132, 30, 248, 153, 59, 249, 54, 158, 59, 75, 150, 226, 41, 253, 153,
    212, 212, 79, 213, 95, 72, 100, 207, 208, 200, 50, 17, 98, 112, 213, 196,
]);

// 6b2oWJP6NdsLFsY8YJqLKXShGwEtztdmrHeArdb3SCLa
const MAINNET_MAIN_MARKET: Pubkey = Pubkey::new_from_array([
    83, 2, 56, 46, 85, 193, 161, 134, 73, 85, 170, 160, 48, 23, 14, 132,
    143, 53, 82, 73, 202, 243, 39, 221, 237, 122, 141, 99, 86, 1, 50, 195,
]);

// Ev6JrN5HqrKwXhoB9jucLdn51yzzDvWmBHkubXWavRio
const DUMMY_PROGRAM: Pubkey = Pubkey::new_from_array([
    206, 193, 182, 229, 249, 217, 24, 63, 206, 242, 101, 37, 46, 176, 188, 71,
    150, 211, 62, 156, 156, 72, 4, 66, 223, 139, 184, 29, 71, 162, 179, 208,
]);

// jQhYCJ8S8z7ce1uYWuQeViHyq8kvGTeJFGBHnDh2QXT
const DEVNET_USDC_RESERVE: Pubkey = Pubkey::new_from_array([
    10, 221, 48, 192, 253, 100, 4, 210, 21, 6, 90, 145, 187, 241, 95, 142,
    228, 242, 223, 202, 0, 141, 24, 212, 137, 170, 179, 160, 201, 149, 254, 138,
]);

// DLaK2XDMgF5hGTQYKNtNgeMKA6JiXmeCauAR96TZmyFA
const DEVNET_SOL_RESERVE: Pubkey = Pubkey::new_from_array([
    183, 79, 241, 112, 194, 155, 251, 226, 172, 63, 156, 92, 173, 55, 98, 39,
    79, 43, 70, 218, 200, 222, 230, 112, 11, 73, 60, 12, 225, 30, 179, 117,
]);

// DK7PqQhKqHuW7euXWxA6YXm7APdvE8x6ckPm3mTfDqVc
const DEVNET_BTC_RESERVE: Pubkey = Pubkey::new_from_array([
    182, 239, 237, 83, 202, 136, 59, 12, 9, 98, 217, 207, 66, 126, 188, 48,
    226, 85, 230, 53, 65, 226, 187, 140, 248, 251, 218, 26, 101, 122, 93, 187,
]);

// FiR57aTPjXDGkr18WdcDGtPYQHdqbPdXocy3tSuwC2ee
const DEVNET_BTC_CALL_RESERVE: Pubkey = Pubkey::new_from_array([
    218, 159, 165, 176, 14, 176, 113, 15, 36, 80, 4, 70, 111, 109, 221, 168,
    94, 221, 146, 119, 145, 221, 49, 63, 133, 27, 105, 203, 250, 157, 93, 3,
]);

// D5z4cXPrLQrSvf36tGWbcYpfFhUHbKeB4E7KnbPSqVU8
const DEVNET_BTC_CALL_VAULT: Pubkey = Pubkey::new_from_array([
    179, 147, 22, 61, 246, 62, 185, 246, 178, 209, 218, 72, 201, 100, 117, 191,
    68, 77, 219, 11, 83, 64, 174, 108, 196, 172, 61, 148, 178, 104, 38, 229,
]);

// CsNg4zfpcJ1LaBvhApqKgLLtrsWZ6prbT1SQuafrMEUN
const DEVNET_BTC_PUT_RESERVE: Pubkey = Pubkey::new_from_array([
    176, 88, 26, 98, 79, 69, 207, 59, 143, 0, 98, 208, 175, 140, 160, 129,
    84, 19, 201, 252, 207, 85, 42, 178, 79, 118, 223, 187, 122, 15, 83, 55,
]);

// 4UtoTfSXEtjJgMJkajj87FFtFBu3XL463mPA266giZMm
const DEVNET_BTC_PUT_VAULT: Pubkey = Pubkey::new_from_array([
    51, 184, 80, 113, 175, 142, 225, 18, 127, 134, 136, 27, 252, 46, 38, 192,
    48, 139, 247, 156, 40, 64, 190, 253, 166, 194, 131, 239, 29, 126, 33, 236,
]);

// 4y7uK2mH5zYmkeUSyg5xtfV2UfZhP7VjNErYSobJmF1e
const MAINNET_USDC_RESERVE: Pubkey = Pubkey::new_from_array([
    58, 243, 99, 221, 210, 224, 67, 175, 131, 57, 231, 112, 9, 108, 129, 62,
    73, 137, 88, 52, 107, 20, 189, 78, 7, 92, 210, 241, 217, 144, 239, 77,
]);

// BD4xq53K6SWiJVKqA3HY6drEJkFXgofaiyrkNziGXakU
const MAINNET_SOL_RESERVE: Pubkey = Pubkey::new_from_array([
    151, 172, 81, 200, 21, 120, 20, 242, 37, 34, 233, 171, 40, 153, 157, 112,
    178, 123, 46, 215, 104, 62, 124, 18, 81, 213, 208, 71, 240, 4, 196, 125,
]);

// C1HMiWMiG5HFdJ34RNhP3D1ANLjc4Yns38UicSPDxBFV
const MAINNET_SOL_PUT_RESERVE: Pubkey = Pubkey::new_from_array([
    163, 131, 13, 33, 193, 223, 244, 174, 188, 101, 136, 72, 88, 75, 162, 122,
    163, 157, 182, 142, 40, 82, 29, 211, 172, 204, 181, 99, 47, 222, 252, 136,
]);

// 7L2TZGBpfB4uBfPqvicqvD3VJSXwLujhzkjUju8yPt5u
const MAINNET_SOL_PUT_VAULT: Pubkey = Pubkey::new_from_array([
    94, 5, 206, 43, 24, 125, 179, 48, 201, 131, 181, 241, 113, 9, 83, 92,
    8, 22, 71, 85, 181, 72, 118, 94, 139, 250, 187, 166, 125, 136, 226, 152,
]);

// 4dT4z89EYJNc3cPgpNPsrnih9Vi7Yg5Hom33ndiES8HM
const MAINNET_WETH_CALL_RESERVE: Pubkey = Pubkey::new_from_array([
    53, 233, 114, 37, 121, 100, 145, 79, 176, 20, 194, 89, 131, 115, 190, 134,
    82, 209, 175, 240, 48, 73, 48, 209, 132, 56, 198, 161, 95, 78, 221, 136,
]);

// 5vaPss2LvGQCrX7Zh5sRAnPD1BRJbp9MdLvQMwet4Bbr
const MAINNET_WETH_CALL_VAULT: Pubkey = Pubkey::new_from_array([
    73, 40, 74, 47, 152, 110, 8, 18, 251, 69, 105, 25, 18, 94, 98, 54,
    208, 146, 240, 22, 9, 99, 82, 95, 124, 192, 20, 16, 59, 114, 156, 149,
]);

// FgyVA9xta2rSNVngThQ4q2NMkfuJbdqt7TZWTEtA6sd6
const MAINNET_SOL_CALL_RESERVE: Pubkey = Pubkey::new_from_array([
    218, 65, 35, 9, 43, 45, 25, 137, 188, 129, 67, 43, 139, 130, 63, 146,
    77, 235, 172, 181, 213, 50, 43, 128, 36, 176, 151, 56, 85, 14, 199, 173,
]);

// 8SNcNyD4FJTFxYRocxaiq47yC41EKNi9bSZ23XngM1M8
const MAINNET_SOL_CALL_VAULT: Pubkey = Pubkey::new_from_array([
    110, 129, 195, 96, 147, 236, 95, 11, 75, 100, 186, 247, 19, 25, 58, 136,
    104, 97, 41, 173, 191, 248, 180, 65, 80, 157, 171, 76, 124, 88, 191, 191,
]);

// 4HSKvUxac2XkyiP5FNQty92uEUgzZoQSLjM9w1dQJysC
const MAINNET_BTC_PUT_RESERVE: Pubkey = Pubkey::new_from_array([
    48, 200, 253, 125, 169, 163, 8, 191, 39, 108, 236, 139, 73, 161, 11, 121,
    162, 127, 247, 97, 4, 187, 75, 152, 21, 21, 81, 59, 160, 156, 117, 215,
]);

// 792ELQdQ6nZBSBrKjRiJXxH1ZFpNjHktnpMdp2auyXMF
const MAINNET_BTC_PUT_VAULT: Pubkey = Pubkey::new_from_array([
    91, 52, 40, 159, 250, 83, 231, 210, 4, 4, 180, 240, 220, 208, 87, 235,
    40, 82, 201, 110, 189, 167, 132, 45, 248, 13, 49, 73, 5, 6, 44, 46,
]);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    Devnet,
    Mainnet,
}

/// A reserve under the main market that clients commonly address by symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WellKnownReserve {
    pub symbol: &'static str,
    pub reserve: Pubkey,
    /// Wrapped-vault account, present for reserves backed by a yield-bearing vault.
    /// Those reserves refresh through `refresh_psyfi_reserve`.
    pub psyfi_vault: Option<Pubkey>,
}

const DEVNET_RESERVES: [WellKnownReserve; 5] = [
    WellKnownReserve { symbol: "USDC", reserve: DEVNET_USDC_RESERVE, psyfi_vault: None },
    WellKnownReserve { symbol: "SOL", reserve: DEVNET_SOL_RESERVE, psyfi_vault: None },
    WellKnownReserve { symbol: "BTC", reserve: DEVNET_BTC_RESERVE, psyfi_vault: None },
    WellKnownReserve {
        symbol: "BTC_CALL",
        reserve: DEVNET_BTC_CALL_RESERVE,
        psyfi_vault: Some(DEVNET_BTC_CALL_VAULT),
    },
    WellKnownReserve {
        symbol: "BTC_PUT",
        reserve: DEVNET_BTC_PUT_RESERVE,
        psyfi_vault: Some(DEVNET_BTC_PUT_VAULT),
    },
];

const MAINNET_RESERVES: [WellKnownReserve; 6] = [
    WellKnownReserve { symbol: "USDC", reserve: MAINNET_USDC_RESERVE, psyfi_vault: None },
    WellKnownReserve { symbol: "SOL", reserve: MAINNET_SOL_RESERVE, psyfi_vault: None },
    WellKnownReserve {
        symbol: "SOL_PUT",
        reserve: MAINNET_SOL_PUT_RESERVE,
        psyfi_vault: Some(MAINNET_SOL_PUT_VAULT),
    },
    WellKnownReserve {
        symbol: "WETH_CALL",
        reserve: MAINNET_WETH_CALL_RESERVE,
        psyfi_vault: Some(MAINNET_WETH_CALL_VAULT),
    },
    WellKnownReserve {
        symbol: "SOL_CALL",
        reserve: MAINNET_SOL_CALL_RESERVE,
        psyfi_vault: Some(MAINNET_SOL_CALL_VAULT),
    },
    WellKnownReserve {
        symbol: "BTC_PUT",
        reserve: MAINNET_BTC_PUT_RESERVE,
        psyfi_vault: Some(MAINNET_BTC_PUT_VAULT),
    },
];

impl Network {
    pub const fn lending_program_id(self) -> Pubkey {
        match self {
            Network::Devnet => DEVNET_LENDING_PROGRAM,
            Network::Mainnet => MAINNET_LENDING_PROGRAM,
        }
    }

    pub const fn main_market(self) -> Pubkey {
        match self {
            Network::Devnet => DEVNET_MAIN_MARKET,
            Network::Mainnet => MAINNET_MAIN_MARKET,
        }
    }

    pub const fn dummy_program_id(self) -> Pubkey {
        DUMMY_PROGRAM
    }

    pub fn reserves(self) -> &'static [WellKnownReserve] {
        match self {
            Network::Devnet => &DEVNET_RESERVES,
            Network::Mainnet => &MAINNET_RESERVES,
        }
    }

    pub fn reserve(self, symbol: &str) -> Option<&'static WellKnownReserve> {
        self.reserves().iter().find(|r| r.symbol == symbol)
    }

    pub fn name(self) -> &'static str {
        match self {
            Network::Devnet => "devnet",
            Network::Mainnet => "mainnet",
        }
    }
}

#[cfg(feature = "devnet")]
pub const ACTIVE: Network = Network::Devnet;
#[cfg(not(feature = "devnet"))]
pub const ACTIVE: Network = Network::Mainnet;

pub const LENDING_PROGRAM_ID: Pubkey = ACTIVE.lending_program_id();
pub const MAIN_MARKET: Pubkey = ACTIVE.main_market();
pub const DUMMY_PROGRAM_ID: Pubkey = ACTIVE.dummy_program_id();
