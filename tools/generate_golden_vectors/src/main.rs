use anchor_lang::prelude::Pubkey;
use psylend_relay::amount::{Amount, AmountUnits};
use psylend_relay::authority::RelayAuthority;
use psylend_relay::network::ACTIVE;
use psylend_relay::pda::PdaKind;
use psylend_relay::sighash::{global, names};
use serde::Serialize;

#[derive(Serialize)]
struct DiscriminatorCase {
    name: String,
    discriminator_hex: String,
}

#[derive(Serialize)]
struct AmountCase {
    units: u8,
    value: u64,
    encoded_hex: String,
}

#[derive(Serialize)]
struct PdaCase {
    kind: String,
    seeds_hex: Vec<String>,
    program_id: String,
    expected_address: String,
    expected_bump: u8,
}

#[derive(Serialize)]
struct Golden {
    network: String,
    lending_program: String,
    main_market: String,
    discriminators: Vec<DiscriminatorCase>,
    amounts: Vec<AmountCase>,
    pdas: Vec<PdaCase>,
    relay_authority: PdaCase,
}

fn pda_case(kind: &PdaKind, program_id: &Pubkey) -> PdaCase {
    let (address, bump) = kind.derive(program_id).found().unwrap();
    PdaCase {
        kind: kind.name().to_string(),
        seeds_hex: kind.seeds().iter().map(hex::encode).collect(),
        program_id: program_id.to_string(),
        expected_address: address.to_string(),
        expected_bump: bump,
    }
}

fn main() {
    let program = ACTIVE.lending_program_id();
    let market = ACTIVE.main_market();
    // Fixed owner so the vectors are reproducible.
    let owner = Pubkey::new_from_array([7u8; 32]);
    let reserve = ACTIVE.reserves()[0].reserve;

    let discriminators = names::ALL
        .iter()
        .map(|name| DiscriminatorCase {
            name: name.to_string(),
            discriminator_hex: hex::encode(global(name)),
        })
        .collect();

    let amounts = [
        (AmountUnits::Tokens, 0u64),
        (AmountUnits::Tokens, 1_000_000),
        (AmountUnits::DepositNotes, 42),
        (AmountUnits::LoanNotes, u64::MAX),
    ]
    .into_iter()
    .map(|(units, value)| AmountCase {
        units: units as u8,
        value,
        encoded_hex: hex::encode(Amount::new(units, value).to_wire()),
    })
    .collect();

    let (obligation, _) = PdaKind::Obligation { market: &market, owner: &owner }
        .derive(&program)
        .found()
        .unwrap();
    let kinds = [
        PdaKind::MarketAuthority { market: &market },
        PdaKind::Obligation { market: &market, owner: &owner },
        PdaKind::Deposit { reserve: &reserve, depositor: &owner },
        PdaKind::Collateral { reserve: &reserve, obligation: &obligation, owner: &owner },
        PdaKind::Loan { reserve: &reserve, obligation: &obligation, owner: &owner },
    ];
    let pdas = kinds.iter().map(|kind| pda_case(kind, &program)).collect();

    let authority = RelayAuthority::derive(&market).unwrap();
    let relay_authority = PdaCase {
        kind: "relay_authority".to_string(),
        seeds_hex: authority.signer_seeds()[..2].iter().map(hex::encode).collect(),
        program_id: psylend_relay::ID.to_string(),
        expected_address: authority.address().to_string(),
        expected_bump: authority.bump(),
    };

    let golden = Golden {
        network: ACTIVE.name().to_string(),
        lending_program: program.to_string(),
        main_market: market.to_string(),
        discriminators,
        amounts,
        pdas,
        relay_authority,
    };
    let json = serde_json::to_string_pretty(&golden).unwrap();
    println!("{}", json);
}
