//! Instruction builders for the mint flows.
//!
//! Builders are pure: they take resolved addresses and return the
//! instructions together with the mint keypairs they generated. Any ledger
//! lookup happens before a builder is called.
use mpl_token_metadata::accounts::{MasterEdition, Metadata};
use sha2::{Digest, Sha256};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_program,
};

use crate::{
    constants::MINT_INSTRUCTION_SIGHASH,
    models::{InstructionSequence, MintError, MintQuantity},
    services::{create_transfer_checked_instruction, MintTemplate},
};

/// Instructions produced by a builder and the keys that must sign them.
#[derive(Debug)]
pub struct BuiltInstructions {
    pub instructions: InstructionSequence,
    pub mint_keypairs: Vec<Keypair>,
}

impl BuiltInstructions {
    pub fn mint_addresses(&self) -> Vec<Pubkey> {
        self.mint_keypairs.iter().map(|mint| mint.pubkey()).collect()
    }
}

/// Who funds a template mint and whether the token owner co-signs it.
#[derive(Debug, Clone, Copy)]
pub struct MintParties {
    pub payer: Pubkey,
    pub owner: Pubkey,
    pub owner_signs: bool,
}

/// Resolved payment leg of a gated mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTerms {
    pub token_mint: Pubkey,
    pub decimals: u8,
    pub price_per_unit: u64,
    pub source: Pubkey,
    pub destination: Pubkey,
}

fn mint_instruction_data(creator_bump: u8) -> Vec<u8> {
    let digest = Sha256::digest(MINT_INSTRUCTION_SIGHASH.as_bytes());
    let mut data = digest[..8].to_vec();
    data.push(creator_bump);
    data
}

fn token_metadata_program_id() -> Pubkey {
    Pubkey::new_from_array(mpl_token_metadata::ID.to_bytes())
}

fn metadata_address(mint: &Pubkey) -> Pubkey {
    let (pda, _) = Metadata::find_pda(&mint.to_bytes().into());
    Pubkey::new_from_array(pda.to_bytes())
}

fn master_edition_address(mint: &Pubkey) -> Pubkey {
    let (pda, _) = MasterEdition::find_pda(&mint.to_bytes().into());
    Pubkey::new_from_array(pda.to_bytes())
}

/// Builds one mint-from-template instruction for a fresh `mint`.
pub fn build_template_mint_instruction(
    template: &MintTemplate,
    parties: &MintParties,
    mint: &Pubkey,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new(template.address, false),
        AccountMeta::new_readonly(template.creator, false),
        AccountMeta::new(parties.payer, true),
        AccountMeta::new(template.wallet, false),
        AccountMeta::new(*mint, true),
        AccountMeta::new(metadata_address(mint), false),
        AccountMeta::new(master_edition_address(mint), false),
        AccountMeta::new_readonly(parties.owner, parties.owner_signs),
        AccountMeta::new_readonly(token_metadata_program_id(), false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Instruction {
        program_id: template.program_id,
        accounts,
        data: mint_instruction_data(template.creator_bump),
    }
}

fn build_mints(template: &MintTemplate, parties: &MintParties, count: u8) -> BuiltInstructions {
    let mint_keypairs: Vec<Keypair> = (0..count).map(|_| Keypair::new()).collect();
    let instructions: InstructionSequence = mint_keypairs
        .iter()
        .map(|mint| build_template_mint_instruction(template, parties, &mint.pubkey()))
        .collect::<Vec<_>>()
        .into();

    BuiltInstructions {
        instructions,
        mint_keypairs,
    }
}

/// Gasless mint: the service pays, the requester co-signs as the token owner.
pub fn build_delegated_mint(
    template: &MintTemplate,
    service_payer: &Pubkey,
    requester: &Pubkey,
) -> BuiltInstructions {
    let parties = MintParties {
        payer: *service_payer,
        owner: *requester,
        owner_signs: true,
    };
    build_mints(template, &parties, 1)
}

/// The requester pays both the network fee and the mint rent.
pub fn build_self_paid_mint(template: &MintTemplate, requester: &Pubkey) -> BuiltInstructions {
    let parties = MintParties {
        payer: *requester,
        owner: *requester,
        owner_signs: true,
    };
    build_mints(template, &parties, 1)
}

/// `price_per_unit * quantity` whole tokens, in base units.
pub fn payment_amount(
    price_per_unit: u64,
    quantity: MintQuantity,
    decimals: u8,
) -> Result<u64, MintError> {
    10u64
        .checked_pow(u32::from(decimals))
        .and_then(|scale| price_per_unit.checked_mul(scale))
        .and_then(|unit| unit.checked_mul(u64::from(quantity.get())))
        .ok_or_else(|| {
            MintError::InstructionBuild(format!(
                "payment of {price_per_unit} x {} at {decimals} decimals overflows",
                quantity.get()
            ))
        })
}

/// Transfer of the gated mint price from the requester to the service.
pub fn build_payment_transfer(
    terms: &PaymentTerms,
    requester: &Pubkey,
    quantity: MintQuantity,
) -> Result<Instruction, MintError> {
    let amount = payment_amount(terms.price_per_unit, quantity, terms.decimals)?;
    create_transfer_checked_instruction(
        &terms.source,
        &terms.token_mint,
        &terms.destination,
        requester,
        amount,
        terms.decimals,
    )
    .map_err(|e| MintError::InstructionBuild(e.to_string()))
}

/// Paid multi-mint: one payment transfer followed by `quantity` mints.
///
/// The transfer is placed first so the mints never land without payment.
pub fn build_gated_mint(
    template: &MintTemplate,
    service_payer: &Pubkey,
    requester: &Pubkey,
    quantity: MintQuantity,
    terms: &PaymentTerms,
) -> Result<BuiltInstructions, MintError> {
    let payment = build_payment_transfer(terms, requester, quantity)?;
    let parties = MintParties {
        payer: *service_payer,
        owner: *requester,
        owner_signs: false,
    };
    let BuiltInstructions {
        instructions,
        mint_keypairs,
    } = build_mints(template, &parties, quantity.get());

    Ok(BuiltInstructions {
        instructions: instructions.prepend(payment),
        mint_keypairs,
    })
}
