#![allow(dead_code)]

use anchor_lang::prelude::*;
use anchor_lang::solana_program::entrypoint::ProgramResult;
use anchor_lang::solana_program::program_error::ProgramError;
use anchor_lang::solana_program::rent::Rent as RentParams;
use anchor_lang::{InstructionData, ToAccountMetas};
use psylend_relay::amount::Amount;
use psylend_relay::authority::RelayAuthority;
use psylend_relay::network::{DUMMY_PROGRAM_ID, LENDING_PROGRAM_ID};
use psylend_relay::pda::PdaKind;
use psylend_relay::sighash::{global, names};
use psylend_relay::state::Number;
use solana_program_test::{processor, BanksClient, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account as SolAccount, instruction::Instruction, signature::Keypair, signer::Signer,
    transaction::Transaction,
};

// Wrap entry as native processor
pub fn relay_entry(program_id: &Pubkey, accounts: &[AccountInfo], input: &[u8]) -> ProgramResult {
    let accounts_coerced: &[AccountInfo<'_>] = unsafe { std::mem::transmute(accounts) };
    psylend_relay::entry(program_id, accounts_coerced, input)
}

pub fn dummy_entry(program_id: &Pubkey, accounts: &[AccountInfo], input: &[u8]) -> ProgramResult {
    let accounts_coerced: &[AccountInfo<'_>] = unsafe { std::mem::transmute(accounts) };
    cpi_dummy::entry(program_id, accounts_coerced, input)
}

/// Absolute offsets (discriminator included) into the lending program's accounts.
pub mod layout {
    pub const TOKEN_LEN: usize = 165;
    pub const T_MINT: usize = 0;
    pub const T_OWNER: usize = 32;
    pub const T_AMOUNT: usize = 64;
    pub const T_STATE: usize = 108;

    pub const RESERVE_LEN: usize = 8 + 5184;
    pub const R_INDEX: usize = 8 + 2;
    pub const R_EXPONENT: usize = 8 + 4;
    pub const R_MARKET: usize = 8 + 8;
    pub const R_VAULT: usize = 8 + 200;
    pub const R_CONFIG: usize = 8 + 768;
    pub const R_FEE_BPS: usize = 8 + 794;
    pub const R_PSYFI_VAULT: usize = 8 + 832;
    pub const R_ACCRUED: usize = 8 + 1600;
    pub const R_DEBT: usize = 8 + 1608;
    pub const R_DEPOSITS: usize = 8 + 1656;
    pub const R_DEPOSIT_NOTES: usize = 8 + 1664;
    pub const R_LOAN_NOTES: usize = 8 + 1672;
    /// Scratch space the mock uses to record the last amount it decoded.
    pub const R_LAST_AMOUNT: usize = 8 + 4096;

    pub const MARKET_LEN: usize = 8 + 16544;
    pub const M_RESERVES: usize = 8 + 672;
    pub const M_RESERVE_INFO_LEN: usize = 496;
    pub const M_DEPOSIT_RATE: usize = 304;
    pub const M_LOAN_RATE: usize = 328;
    /// Per-reserve counter the mock bumps on every refresh.
    pub const M_REFRESH_COUNT: usize = 480;

    pub const OBLIGATION_LEN: usize = 8 + 5632;
    pub const O_MARKET: usize = 8 + 8;
    pub const O_OWNER: usize = 8 + 40;
    pub const O_COLLATERAL: usize = 8 + 512;
    pub const O_LOANS: usize = 8 + 3072;
    pub const O_POSITION_LEN: usize = 160;
    pub const O_POSITIONS: usize = 16;
    pub const P_AMOUNT: usize = 32;
    pub const P_INDEX: usize = 84;
}

use layout::*;

/// Tokens of interest credited to a reserve with outstanding notes on every accrual.
pub const INTEREST_PER_ACCRUAL: u64 = 1;

pub const MOCK_STALE_RESERVE: u32 = 0x5701;
pub const MOCK_NOT_EMPTY: u32 = 0x5702;
pub const MOCK_INSUFFICIENT: u32 = 0x5703;
pub const MOCK_BAD_OWNER: u32 = 0x5704;
pub const MOCK_ALREADY_INIT: u32 = 0x5705;
pub const MOCK_WRONG_VAULT: u32 = 0x5706;

pub fn read_u64(data: &[u8], at: usize) -> u64 {
    u64::from_le_bytes(data[at..at + 8].try_into().unwrap())
}

pub fn write_u64(data: &mut [u8], at: usize, value: u64) {
    data[at..at + 8].copy_from_slice(&value.to_le_bytes());
}

pub fn write_number(data: &mut [u8], at: usize, value: Number) {
    data[at..at + Number::ENCODED_LEN].copy_from_slice(&value.to_le_bytes());
}

pub fn read_pubkey(data: &[u8], at: usize) -> Pubkey {
    Pubkey::new_from_array(data[at..at + 32].try_into().unwrap())
}

pub fn token_data(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; TOKEN_LEN];
    data[T_MINT..T_MINT + 32].copy_from_slice(mint.as_ref());
    data[T_OWNER..T_OWNER + 32].copy_from_slice(owner.as_ref());
    write_u64(&mut data, T_AMOUNT, amount);
    data[T_STATE] = 1;
    data
}

/// Stand-in for the lending program: just enough bookkeeping to observe what the relay sends.
pub mod mock_lending {
    use super::*;

    type MockResult<T> = std::result::Result<T, ProgramError>;

    fn custom(code: u32) -> ProgramError {
        ProgramError::Custom(code)
    }

    fn amount_at(input: &[u8], at: usize) -> MockResult<Amount> {
        let raw = input
            .get(at..at + Amount::WIRE_LEN)
            .ok_or(ProgramError::InvalidInstructionData)?;
        Amount::try_from_slice(raw).map_err(|_| ProgramError::InvalidInstructionData)
    }

    fn signed(info: &AccountInfo) -> MockResult<()> {
        if info.is_signer {
            Ok(())
        } else {
            Err(ProgramError::MissingRequiredSignature)
        }
    }

    fn balance(info: &AccountInfo) -> u64 {
        read_u64(&info.data.borrow(), T_AMOUNT)
    }

    fn credit(info: &AccountInfo, amount: u64) -> MockResult<()> {
        let next = balance(info).checked_add(amount).ok_or(ProgramError::ArithmeticOverflow)?;
        write_u64(&mut info.data.borrow_mut(), T_AMOUNT, next);
        Ok(())
    }

    fn debit(info: &AccountInfo, amount: u64) -> MockResult<()> {
        let next = balance(info).checked_sub(amount).ok_or(custom(MOCK_INSUFFICIENT))?;
        write_u64(&mut info.data.borrow_mut(), T_AMOUNT, next);
        Ok(())
    }

    fn owned_by(token: &AccountInfo, owner: &AccountInfo) -> MockResult<()> {
        if read_pubkey(&token.data.borrow(), T_OWNER) == *owner.key {
            Ok(())
        } else {
            Err(custom(MOCK_BAD_OWNER))
        }
    }

    fn reserve_u64(reserve: &AccountInfo, at: usize) -> u64 {
        read_u64(&reserve.data.borrow(), at)
    }

    fn set_reserve_u64(reserve: &AccountInfo, at: usize, value: u64) {
        write_u64(&mut reserve.data.borrow_mut(), at, value);
    }

    fn record(reserve: &AccountInfo, amount: &Amount) {
        reserve.data.borrow_mut()[R_LAST_AMOUNT..R_LAST_AMOUNT + Amount::WIRE_LEN]
            .copy_from_slice(&amount.to_wire());
    }

    fn take_fresh(reserve: &AccountInfo) -> MockResult<()> {
        if reserve_u64(reserve, R_ACCRUED) != 1 {
            return Err(custom(MOCK_STALE_RESERVE));
        }
        set_reserve_u64(reserve, R_ACCRUED, 0);
        Ok(())
    }

    fn mul_div(a: u64, b: u64, c: u64, round_up: bool) -> MockResult<u64> {
        if c == 0 {
            return Ok(a);
        }
        let n = a as u128 * b as u128;
        let q = if round_up { (n + c as u128 - 1) / c as u128 } else { n / c as u128 };
        u64::try_from(q).map_err(|_| ProgramError::ArithmeticOverflow)
    }

    fn init_token(account: &AccountInfo, mint: &Pubkey, owner: &Pubkey) -> MockResult<()> {
        if account.data.borrow()[T_STATE] != 0 {
            return Err(custom(MOCK_ALREADY_INIT));
        }
        account.data.borrow_mut().copy_from_slice(&token_data(mint, owner, 0));
        Ok(())
    }

    fn close(account: &AccountInfo, receiver: &AccountInfo) -> MockResult<()> {
        if balance(account) != 0 {
            return Err(custom(MOCK_NOT_EMPTY));
        }
        let lamports = account.lamports();
        **account.try_borrow_mut_lamports()? = 0;
        **receiver.try_borrow_mut_lamports()? += lamports;
        account.data.borrow_mut().fill(0);
        Ok(())
    }

    fn slot_base(side_base: usize, slot: usize) -> usize {
        side_base + slot * O_POSITION_LEN
    }

    fn register_position(obligation: &AccountInfo, side: usize, account: &Pubkey, index: u16) -> MockResult<()> {
        let mut data = obligation.data.borrow_mut();
        for slot in 0..O_POSITIONS {
            let at = slot_base(side, slot);
            if read_pubkey(&data, at) == Pubkey::default() {
                data[at..at + 32].copy_from_slice(account.as_ref());
                data[at + P_INDEX..at + P_INDEX + 2].copy_from_slice(&index.to_le_bytes());
                return Ok(());
            }
        }
        Err(custom(MOCK_INSUFFICIENT))
    }

    fn drop_position(obligation: &AccountInfo, side: usize, account: &Pubkey) {
        let mut data = obligation.data.borrow_mut();
        for slot in 0..O_POSITIONS {
            let at = slot_base(side, slot);
            if read_pubkey(&data, at) == *account {
                data[at..at + O_POSITION_LEN].fill(0);
            }
        }
    }

    fn set_position_amount(obligation: &AccountInfo, side: usize, account: &Pubkey, notes: u64) {
        let mut data = obligation.data.borrow_mut();
        for slot in 0..O_POSITIONS {
            let at = slot_base(side, slot);
            if read_pubkey(&data, at) == *account {
                write_number(&mut data, at + P_AMOUNT, Number::from_u64(notes));
            }
        }
    }

    fn refreshed(market: &AccountInfo, reserve: &AccountInfo) -> ProgramResult {
        let at = M_RESERVES
            + reserve_index(reserve) as usize * M_RESERVE_INFO_LEN
            + M_REFRESH_COUNT;
        let mut data = market.data.borrow_mut();
        let count = read_u64(&data, at);
        write_u64(&mut data, at, count + 1);
        Ok(())
    }

    fn reserve_index(reserve: &AccountInfo) -> u16 {
        let data = reserve.data.borrow();
        u16::from_le_bytes([data[R_INDEX], data[R_INDEX + 1]])
    }

    pub fn process(_program_id: &Pubkey, accounts: &[AccountInfo], input: &[u8]) -> ProgramResult {
        let head = input.get(..8).ok_or(ProgramError::InvalidInstructionData)?;
        let name = names::ALL
            .iter()
            .find(|n| global(n)[..] == *head)
            .ok_or(ProgramError::InvalidInstructionData)?;
        let a = accounts;
        match *name {
            names::REFRESH_RESERVE => refreshed(&a[0], &a[1]),
            names::REFRESH_PSYFI_RESERVE => {
                let configured = read_pubkey(&a[1].data.borrow(), R_PSYFI_VAULT);
                if configured == Pubkey::default() || configured != *a[2].key {
                    return Err(custom(MOCK_WRONG_VAULT));
                }
                refreshed(&a[0], &a[1])
            }
            names::ACCRUE_INTEREST => {
                let reserve = &a[2];
                if reserve_u64(reserve, R_DEPOSIT_NOTES) > 0 {
                    let deposits = reserve_u64(reserve, R_DEPOSITS);
                    set_reserve_u64(reserve, R_DEPOSITS, deposits + INTEREST_PER_ACCRUAL);
                }
                set_reserve_u64(reserve, R_ACCRUED, 1);
                Ok(())
            }
            names::INIT_OBLIGATION => {
                signed(&a[2])?;
                let mut data = a[3].data.borrow_mut();
                data[O_MARKET..O_MARKET + 32].copy_from_slice(a[0].key.as_ref());
                data[O_OWNER..O_OWNER + 32].copy_from_slice(a[2].key.as_ref());
                Ok(())
            }
            names::CLOSE_OBLIGATION => {
                signed(&a[2])?;
                let (owner, obligation) = (&a[2], &a[3]);
                {
                    let data = obligation.data.borrow();
                    for side in [O_COLLATERAL, O_LOANS] {
                        for slot in 0..O_POSITIONS {
                            if read_pubkey(&data, slot_base(side, slot)) != Pubkey::default() {
                                return Err(custom(MOCK_NOT_EMPTY));
                            }
                        }
                    }
                }
                let lamports = obligation.lamports();
                **obligation.try_borrow_mut_lamports()? = 0;
                **owner.try_borrow_mut_lamports()? += lamports;
                obligation.data.borrow_mut().fill(0);
                Ok(())
            }
            names::INIT_DEPOSIT_ACCOUNT => {
                signed(&a[5])?;
                init_token(&a[6], a[3].key, a[4].key)
            }
            names::CLOSE_DEPOSIT_ACCOUNT => {
                signed(&a[5])?;
                close(&a[6], &a[5])
            }
            names::DEPOSIT | names::DEPOSIT_TOKENS => {
                let amount_at_offset = if *name == names::DEPOSIT { 9 } else { 8 };
                let amount = amount_at(input, amount_at_offset)?;
                let (reserve, vault, depositor, notes_account, source) =
                    (&a[2], &a[3], &a[5], &a[6], &a[7]);
                signed(depositor)?;
                owned_by(source, depositor)?;
                take_fresh(reserve)?;
                record(reserve, &amount);
                let deposits = reserve_u64(reserve, R_DEPOSITS);
                let supply = reserve_u64(reserve, R_DEPOSIT_NOTES);
                let (tokens, notes) = match amount {
                    Amount::Tokens(v) => (v, mul_div(v, supply, deposits, false)?),
                    Amount::DepositNotes(n) => (mul_div(n, deposits, supply, true)?, n),
                    Amount::LoanNotes(_) => return Err(ProgramError::InvalidArgument),
                };
                debit(source, tokens)?;
                credit(vault, tokens)?;
                credit(notes_account, notes)?;
                set_reserve_u64(reserve, R_DEPOSITS, deposits + tokens);
                set_reserve_u64(reserve, R_DEPOSIT_NOTES, supply + notes);
                Ok(())
            }
            names::WITHDRAW | names::WITHDRAW_TOKENS => {
                let amount_at_offset = if *name == names::WITHDRAW { 9 } else { 8 };
                let amount = amount_at(input, amount_at_offset)?;
                let (reserve, vault, depositor, notes_account, receiver) =
                    (&a[2], &a[3], &a[5], &a[6], &a[7]);
                signed(depositor)?;
                owned_by(notes_account, depositor)?;
                take_fresh(reserve)?;
                record(reserve, &amount);
                let deposits = reserve_u64(reserve, R_DEPOSITS);
                let supply = reserve_u64(reserve, R_DEPOSIT_NOTES);
                let (tokens, notes) = match amount {
                    Amount::Tokens(v) => (v, mul_div(v, supply, deposits, true)?),
                    Amount::DepositNotes(n) => (mul_div(n, deposits, supply, false)?, n),
                    Amount::LoanNotes(_) => return Err(ProgramError::InvalidArgument),
                };
                debit(notes_account, notes)?;
                debit(vault, tokens)?;
                credit(receiver, tokens)?;
                set_reserve_u64(reserve, R_DEPOSITS, deposits.saturating_sub(tokens));
                set_reserve_u64(reserve, R_DEPOSIT_NOTES, supply.saturating_sub(notes));
                Ok(())
            }
            names::INIT_COLLATERAL_ACCOUNT | names::INIT_LOAN_ACCOUNT => {
                let (obligation, reserve, mint, owner, account) = (&a[2], &a[3], &a[4], &a[5], &a[6]);
                signed(owner)?;
                init_token(account, mint.key, owner.key)?;
                let side = if *name == names::INIT_LOAN_ACCOUNT { O_LOANS } else { O_COLLATERAL };
                register_position(obligation, side, account.key, reserve_index(reserve))
            }
            names::CLOSE_COLLATERAL_ACCOUNT | names::CLOSE_LOAN_ACCOUNT => {
                let (obligation, owner, account) = (&a[2], &a[3], &a[4]);
                signed(owner)?;
                close(account, owner)?;
                let side = if *name == names::CLOSE_LOAN_ACCOUNT { O_LOANS } else { O_COLLATERAL };
                drop_position(obligation, side, account.key);
                Ok(())
            }
            names::DEPOSIT_COLLATERAL | names::WITHDRAW_COLLATERAL => {
                let amount = amount_at(input, 10)?;
                let (reserve, obligation, owner, deposit_account, collateral) =
                    (&a[2], &a[3], &a[4], &a[5], &a[6]);
                signed(owner)?;
                let notes = match amount {
                    Amount::DepositNotes(n) => n,
                    Amount::Tokens(v) => mul_div(
                        v,
                        reserve_u64(reserve, R_DEPOSIT_NOTES),
                        reserve_u64(reserve, R_DEPOSITS),
                        false,
                    )?,
                    Amount::LoanNotes(_) => return Err(ProgramError::InvalidArgument),
                };
                if *name == names::DEPOSIT_COLLATERAL {
                    debit(deposit_account, notes)?;
                    credit(collateral, notes)?;
                } else {
                    debit(collateral, notes)?;
                    credit(deposit_account, notes)?;
                }
                set_position_amount(obligation, O_COLLATERAL, collateral.key, balance(collateral));
                Ok(())
            }
            names::BORROW => {
                let amount = amount_at(input, 9)?;
                let (obligation, reserve, vault, borrower, loan, receiver) =
                    (&a[2], &a[3], &a[4], &a[6], &a[7], &a[8]);
                signed(borrower)?;
                record(reserve, &amount);
                let tokens = match amount {
                    Amount::Tokens(v) => v,
                    _ => return Err(ProgramError::InvalidArgument),
                };
                let fee_bps = {
                    let data = reserve.data.borrow();
                    u16::from_le_bytes([data[R_FEE_BPS], data[R_FEE_BPS + 1]])
                };
                let fee = (tokens as u128 * fee_bps as u128 / 10_000).max(1) as u64;
                let notes = tokens + fee;
                debit(vault, tokens)?;
                credit(receiver, tokens)?;
                credit(loan, notes)?;
                let loan_notes = reserve_u64(reserve, R_LOAN_NOTES);
                set_reserve_u64(reserve, R_LOAN_NOTES, loan_notes + notes);
                let deposits = reserve_u64(reserve, R_DEPOSITS);
                set_reserve_u64(reserve, R_DEPOSITS, deposits.saturating_sub(tokens));
                set_position_amount(obligation, O_LOANS, loan.key, balance(loan));
                Ok(())
            }
            names::REPAY => {
                let amount = amount_at(input, 8)?;
                let (obligation, reserve, vault, loan, payer_account, payer) =
                    (&a[2], &a[3], &a[4], &a[6], &a[7], &a[8]);
                signed(payer)?;
                owned_by(payer_account, payer)?;
                record(reserve, &amount);
                let notes = match amount {
                    Amount::Tokens(v) | Amount::LoanNotes(v) => v,
                    Amount::DepositNotes(_) => return Err(ProgramError::InvalidArgument),
                };
                debit(payer_account, notes)?;
                credit(vault, notes)?;
                debit(loan, notes)?;
                let loan_notes = reserve_u64(reserve, R_LOAN_NOTES);
                set_reserve_u64(reserve, R_LOAN_NOTES, loan_notes.saturating_sub(notes));
                let deposits = reserve_u64(reserve, R_DEPOSITS);
                set_reserve_u64(reserve, R_DEPOSITS, deposits + notes);
                set_position_amount(obligation, O_LOANS, loan.key, balance(loan));
                Ok(())
            }
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }
}

/// Starting state of one test validator.
#[derive(Clone, Debug)]
pub struct Seed {
    pub total_deposits: u64,
    pub total_deposit_notes: u64,
    pub vault_buffer: u64,
    pub source_balance: u64,
    /// `None` leaves the deposit account allocated but uninitialised.
    pub deposit_notes: Option<u64>,
    pub obligation_open: bool,
    pub outstanding_debt: u64,
    pub loan_origination_fee_bps: u16,
    /// util1, util2, br0, br1, br2, br3 in basis points.
    pub rate_curve: [u16; 6],
    /// Configure the reserve with the fixture's wrapped vault.
    pub psyfi_backed: bool,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            total_deposits: 1_000,
            total_deposit_notes: 1_000,
            vault_buffer: 1_000,
            source_balance: 10_000,
            deposit_notes: Some(0),
            obligation_open: false,
            outstanding_debt: 0,
            loan_origination_fee_bps: 50,
            rate_curve: [5_000, 8_000, 200, 1_000, 2_000, 5_000],
            psyfi_backed: false,
        }
    }
}

pub struct Fixture {
    pub owner: Keypair,
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub reserve: Pubkey,
    pub vault: Pubkey,
    pub fee_note_vault: Pubkey,
    pub token_mint: Pubkey,
    pub deposit_note_mint: Pubkey,
    pub loan_note_mint: Pubkey,
    pub pyth_oracle_price: Pubkey,
    pub psyfi_vault: Pubkey,
    pub source: Pubkey,
    pub receiver: Pubkey,
    pub obligation: (Pubkey, u8),
    pub deposit_account: (Pubkey, u8),
    pub collateral_account: (Pubkey, u8),
    pub loan_account: (Pubkey, u8),
    pub relay_authority: RelayAuthority,
    pub authority_source: Pubkey,
    pub authority_notes: Pubkey,
}

fn derive(kind: PdaKind) -> (Pubkey, u8) {
    kind.derive(&LENDING_PROGRAM_ID).found().unwrap()
}

fn lending_account(data: Vec<u8>) -> SolAccount {
    SolAccount {
        lamports: RentParams::default().minimum_balance(data.len()),
        data,
        owner: LENDING_PROGRAM_ID,
        executable: false,
        rent_epoch: 0,
    }
}

impl Fixture {
    pub fn new() -> Self {
        let owner = Keypair::new();
        let market = Pubkey::new_unique();
        let reserve = Pubkey::new_unique();
        let owner_key = owner.pubkey();
        let (market_authority, _) = derive(PdaKind::MarketAuthority { market: &market });
        let obligation = derive(PdaKind::Obligation { market: &market, owner: &owner_key });
        let deposit_account = derive(PdaKind::Deposit { reserve: &reserve, depositor: &owner_key });
        let collateral_account = derive(PdaKind::Collateral {
            reserve: &reserve,
            obligation: &obligation.0,
            owner: &owner_key,
        });
        let loan_account = derive(PdaKind::Loan {
            reserve: &reserve,
            obligation: &obligation.0,
            owner: &owner_key,
        });
        let relay_authority = RelayAuthority::derive(&market).unwrap();
        Self {
            owner,
            market,
            market_authority,
            reserve,
            vault: Pubkey::new_unique(),
            fee_note_vault: Pubkey::new_unique(),
            token_mint: Pubkey::new_unique(),
            deposit_note_mint: Pubkey::new_unique(),
            loan_note_mint: Pubkey::new_unique(),
            pyth_oracle_price: Pubkey::new_unique(),
            psyfi_vault: Pubkey::new_unique(),
            source: Pubkey::new_unique(),
            receiver: Pubkey::new_unique(),
            obligation,
            deposit_account,
            collateral_account,
            loan_account,
            relay_authority,
            authority_source: Pubkey::new_unique(),
            authority_notes: Pubkey::new_unique(),
        }
    }

    pub fn market_data(&self) -> Vec<u8> {
        let mut data = vec![0u8; MARKET_LEN];
        data[M_RESERVES..M_RESERVES + 32].copy_from_slice(self.reserve.as_ref());
        write_number(&mut data, M_RESERVES + M_DEPOSIT_RATE, Number::ONE);
        write_number(&mut data, M_RESERVES + M_LOAN_RATE, Number::ONE);
        data
    }

    pub fn reserve_data(&self, seed: &Seed) -> Vec<u8> {
        let mut data = vec![0u8; RESERVE_LEN];
        data[R_INDEX..R_INDEX + 2].copy_from_slice(&0u16.to_le_bytes());
        data[R_EXPONENT..R_EXPONENT + 4].copy_from_slice(&0i32.to_le_bytes());
        data[R_MARKET..R_MARKET + 32].copy_from_slice(self.market.as_ref());
        data[R_VAULT..R_VAULT + 32].copy_from_slice(self.vault.as_ref());
        for (i, bps) in seed.rate_curve.iter().enumerate() {
            data[R_CONFIG + 2 * i..R_CONFIG + 2 * i + 2].copy_from_slice(&bps.to_le_bytes());
        }
        data[R_FEE_BPS..R_FEE_BPS + 2].copy_from_slice(&seed.loan_origination_fee_bps.to_le_bytes());
        if seed.psyfi_backed {
            data[R_PSYFI_VAULT..R_PSYFI_VAULT + 32].copy_from_slice(self.psyfi_vault.as_ref());
        }
        write_number(&mut data, R_DEBT, Number::from_u64(seed.outstanding_debt));
        write_u64(&mut data, R_DEPOSITS, seed.total_deposits);
        write_u64(&mut data, R_DEPOSIT_NOTES, seed.total_deposit_notes);
        data
    }

    pub fn refresh_count(market: &[u8]) -> u64 {
        read_u64(market, M_RESERVES + M_REFRESH_COUNT)
    }

    pub fn obligation_data(&self) -> Vec<u8> {
        let mut data = vec![0u8; OBLIGATION_LEN];
        data[O_MARKET..O_MARKET + 32].copy_from_slice(self.market.as_ref());
        data[O_OWNER..O_OWNER + 32].copy_from_slice(self.owner.pubkey().as_ref());
        data
    }

    pub fn program_test(&self, seed: &Seed) -> ProgramTest {
        let mut program = ProgramTest::new(
            "psylend_relay",
            psylend_relay::ID,
            processor!(relay_entry),
        );
        program.add_program("psylend_mock", LENDING_PROGRAM_ID, processor!(mock_lending::process));
        program.add_program("cpi_dummy", DUMMY_PROGRAM_ID, processor!(dummy_entry));
        self.add_accounts(&mut program, seed);
        program
    }

    pub fn add_accounts(&self, program: &mut ProgramTest, seed: &Seed) {
        let owner = self.owner.pubkey();
        let authority = self.relay_authority.address();
        program.add_account(
            owner,
            SolAccount {
                lamports: 1_000_000_000,
                data: vec![],
                owner: anchor_lang::solana_program::system_program::ID,
                executable: false,
                rent_epoch: 0,
            },
        );
        program.add_account(self.market, lending_account(self.market_data()));
        program.add_account(self.reserve, lending_account(self.reserve_data(seed)));
        program.add_account(
            self.vault,
            lending_account(token_data(
                &self.token_mint,
                &self.market_authority,
                seed.total_deposits + seed.vault_buffer,
            )),
        );
        program.add_account(
            self.source,
            lending_account(token_data(&self.token_mint, &owner, seed.source_balance)),
        );
        program.add_account(self.receiver, lending_account(token_data(&self.token_mint, &owner, 0)));
        let deposit_data = match seed.deposit_notes {
            Some(notes) => token_data(&self.deposit_note_mint, &owner, notes),
            None => vec![0u8; TOKEN_LEN],
        };
        program.add_account(self.deposit_account.0, lending_account(deposit_data));
        program.add_account(self.collateral_account.0, lending_account(vec![0u8; TOKEN_LEN]));
        program.add_account(self.loan_account.0, lending_account(vec![0u8; TOKEN_LEN]));
        let obligation = if seed.obligation_open {
            self.obligation_data()
        } else {
            vec![0u8; OBLIGATION_LEN]
        };
        program.add_account(self.obligation.0, lending_account(obligation));
        program.add_account(
            self.authority_source,
            lending_account(token_data(&self.token_mint, &authority, seed.source_balance)),
        );
        program.add_account(
            self.authority_notes,
            lending_account(token_data(&self.deposit_note_mint, &authority, 0)),
        );
    }

    pub fn accrue_accounts(&self) -> psylend_relay::accounts::AccrueInterest {
        psylend_relay::accounts::AccrueInterest {
            market: self.market,
            market_authority: self.market_authority,
            reserve: self.reserve,
            fee_note_vault: self.fee_note_vault,
            deposit_note_mint: self.deposit_note_mint,
            lending_program: LENDING_PROGRAM_ID,
            token_program: anchor_spl::token::ID,
        }
    }

    pub fn deposit_accounts(&self) -> psylend_relay::accounts::Deposit {
        psylend_relay::accounts::Deposit {
            market: self.market,
            market_authority: self.market_authority,
            reserve: self.reserve,
            vault: self.vault,
            deposit_note_mint: self.deposit_note_mint,
            depositor: self.owner.pubkey(),
            deposit_account: self.deposit_account.0,
            deposit_source: self.source,
            lending_program: LENDING_PROGRAM_ID,
            token_program: anchor_spl::token::ID,
        }
    }

    pub fn withdraw_accounts(&self) -> psylend_relay::accounts::Withdraw {
        psylend_relay::accounts::Withdraw {
            market: self.market,
            market_authority: self.market_authority,
            reserve: self.reserve,
            vault: self.vault,
            deposit_note_mint: self.deposit_note_mint,
            depositor: self.owner.pubkey(),
            deposit_account: self.deposit_account.0,
            withdraw_account: self.source,
            lending_program: LENDING_PROGRAM_ID,
            token_program: anchor_spl::token::ID,
        }
    }
}

pub fn relay_ix(accounts: impl ToAccountMetas, data: impl InstructionData) -> Instruction {
    Instruction {
        program_id: psylend_relay::ID,
        accounts: accounts.to_account_metas(None),
        data: data.data(),
    }
}

pub async fn send(
    ctx: &mut ProgramTestContext,
    ixs: &[Instruction],
    extra_signers: &[&Keypair],
) -> std::result::Result<(), solana_program_test::BanksClientError> {
    let payer = Keypair::from_bytes(&ctx.payer.to_bytes()).expect("clone payer");
    let mut signers: Vec<&Keypair> = vec![&payer];
    signers.extend_from_slice(extra_signers);
    let signer_keys: Vec<Pubkey> = extra_signers.iter().map(|k| k.pubkey()).collect();
    let ixs: Vec<Instruction> = ixs
        .iter()
        .cloned()
        .map(|mut ix| {
            for meta in ix.accounts.iter_mut() {
                if signer_keys.contains(&meta.pubkey) {
                    meta.is_signer = true;
                }
            }
            ix
        })
        .collect();
    let blockhash = ctx.banks_client.get_latest_blockhash().await?;
    let tx = Transaction::new_signed_with_payer(&ixs, Some(&payer.pubkey()), &signers, blockhash);
    ctx.banks_client.process_transaction(tx).await
}

pub async fn data_of(banks: &mut BanksClient, key: Pubkey) -> Option<Vec<u8>> {
    banks.get_account(key).await.unwrap().map(|a| a.data)
}

pub async fn token_balance(banks: &mut BanksClient, key: Pubkey) -> u64 {
    let data = data_of(banks, key).await.expect("token account exists");
    read_u64(&data, T_AMOUNT)
}

pub fn relay_error(code: psylend_relay::error::RelayError) -> u32 {
    code as u32 + anchor_lang::error::ERROR_CODE_OFFSET
}

pub fn custom_code(err: solana_program_test::BanksClientError) -> Option<u32> {
    use solana_sdk::instruction::InstructionError;
    use solana_sdk::transaction::TransactionError;
    match err.unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(code),
        _ => None,
    }
}
