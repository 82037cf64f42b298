//! # Mint Controller
//!
//! Validates transaction-request input and hands it to the mint service.
//! All validation happens before any ledger call is made, so a rejected
//! request never generates keys or touches the network.
use std::str::FromStr;

use actix_web::HttpResponse;
use log::warn;
use solana_sdk::pubkey::Pubkey;

use crate::models::{
    ApiError, AppState, MintAccountRequest, MintFlow, MintQuantity, MintRequest,
};

pub const MISSING_ACCOUNT_MESSAGE: &str = "No account provided";
pub const INVALID_ACCOUNT_MESSAGE: &str = "Invalid account";
pub const QUANTITY_NOT_SINGLE_MESSAGE: &str = "quantity must be provided exactly once";

/// Static label and icon shown by the wallet before it posts.
pub fn get_metadata(state: &AppState) -> HttpResponse {
    HttpResponse::Ok().json(&state.metadata)
}

pub fn parse_account(body: Option<MintAccountRequest>) -> Result<Pubkey, ApiError> {
    let account = body
        .and_then(|body| body.account)
        .filter(|account| !account.is_empty())
        .ok_or_else(|| ApiError::BadRequest(MISSING_ACCOUNT_MESSAGE.to_string()))?;

    Pubkey::from_str(&account).map_err(|_| {
        warn!("Rejected malformed account {account:?}");
        ApiError::BadRequest(INVALID_ACCOUNT_MESSAGE.to_string())
    })
}

/// Reads `quantity` for flows that take one; other flows mint exactly one.
pub fn parse_quantity(
    flow: MintFlow,
    query: &[(String, String)],
    max: u8,
) -> Result<MintQuantity, ApiError> {
    if !flow.requires_quantity() {
        return Ok(MintQuantity::default());
    }

    let mut values = query
        .iter()
        .filter(|(key, _)| key == "quantity")
        .map(|(_, value)| value);

    match (values.next(), values.next()) {
        (Some(raw), None) => Ok(MintQuantity::parse(raw, max)?),
        _ => Err(ApiError::BadRequest(QUANTITY_NOT_SINGLE_MESSAGE.to_string())),
    }
}

pub async fn create_mint_transaction(
    flow: MintFlow,
    query: Vec<(String, String)>,
    body: Option<MintAccountRequest>,
    state: &AppState,
) -> Result<HttpResponse, ApiError> {
    let account = parse_account(body)?;
    let max = state.mint_service.config().max_quantity;
    let quantity = parse_quantity(flow, &query, max)?;

    let response = state
        .mint_service
        .execute(flow, &MintRequest { account, quantity })
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
