//! Mint transaction pipeline.
//!
//! A request flows through four stages:
//!
//! ```text
//! builders ──► composer ──► signing ──► serializer
//! (instructions    (fee payer,     (service and     (bincode,
//!  + mint keys)     blockhash)      mint keys)       base64)
//! ```
//!
//! [`MintService`] resolves the ledger state each stage needs and drives the
//! stages in order. Nothing is cached between requests; the generated mint
//! keypairs are dropped together with the request.
use std::{sync::Arc, time::Instant};

use log::{debug, info};
use solana_sdk::pubkey::Pubkey;

mod builders;
pub use builders::*;

mod composer;
pub use composer::*;

mod signing;
pub use signing::*;

mod serializer;
pub use serializer::*;

use crate::{
    config::MintConfig,
    metrics::observe_mint,
    models::{MintError, MintFlow, MintRequest, MintResponse},
    services::{
        AssociatedAccountResolverTrait, ServiceKeys, SolanaProviderTrait, SolanaSignTrait,
        TemplateRegistryTrait,
    },
};

pub struct MintService {
    provider: Arc<dyn SolanaProviderTrait>,
    registry: Arc<dyn TemplateRegistryTrait>,
    accounts: Arc<dyn AssociatedAccountResolverTrait>,
    keys: ServiceKeys,
    config: MintConfig,
}

impl MintService {
    pub fn new(
        provider: Arc<dyn SolanaProviderTrait>,
        registry: Arc<dyn TemplateRegistryTrait>,
        accounts: Arc<dyn AssociatedAccountResolverTrait>,
        keys: ServiceKeys,
        config: MintConfig,
    ) -> Self {
        Self {
            provider,
            registry,
            accounts,
            keys,
            config,
        }
    }

    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    /// Builds, partially signs and encodes the transaction for `request`.
    pub async fn execute(
        &self,
        flow: MintFlow,
        request: &MintRequest,
    ) -> Result<MintResponse, MintError> {
        let started = Instant::now();
        let result = self.build(flow, request).await;
        observe_mint(flow.as_str(), result.is_ok(), started.elapsed().as_secs_f64());

        if result.is_ok() {
            info!(
                "Built {flow} mint transaction for {} (quantity {})",
                request.account,
                request.quantity.get()
            );
        }
        result
    }

    async fn build(&self, flow: MintFlow, request: &MintRequest) -> Result<MintResponse, MintError> {
        let requester = request.account;
        let payer = self.keys.payer_pubkey();

        let template = self
            .registry
            .get_template()
            .await
            .map_err(|e| MintError::TemplateNotFound(e.to_string()))?;

        let (built, fee_payer) = match flow {
            MintFlow::Delegated => (build_delegated_mint(&template, &payer, &requester), payer),
            MintFlow::SelfPaid => (build_self_paid_mint(&template, &requester), requester),
            MintFlow::Gated => {
                let terms = self.payment_terms(&requester).await?;
                let built =
                    build_gated_mint(&template, &payer, &requester, request.quantity, &terms)?;
                (built, payer)
            }
        };
        let BuiltInstructions {
            instructions,
            mint_keypairs,
        } = built;

        let blockhash = self
            .provider
            .get_latest_blockhash()
            .await
            .map_err(|e| MintError::BlockhashUnavailable(e.to_string()))?;
        let transaction = compose([instructions], &fee_payer, blockhash)?;

        let mut signers: Vec<&dyn SolanaSignTrait> = Vec::with_capacity(mint_keypairs.len() + 1);
        if fee_payer == payer {
            signers.push(self.keys.payer());
        }
        signers.extend(mint_keypairs.iter().map(|mint| mint as &dyn SolanaSignTrait));

        let transaction = sign_partial(transaction, &signers, &requester).await?;
        debug!(
            "Composed {flow} transaction with {} instructions and {} signers",
            transaction.message.instructions.len(),
            transaction.message.header.num_required_signatures
        );

        into_mint_response(&transaction, flow)
    }

    async fn payment_terms(
        &self,
        requester: &Pubkey,
    ) -> Result<PaymentTerms, MintError> {
        let token_mint = self.config.payment_token_mint;
        let decimals = self
            .provider
            .get_token_decimals(&token_mint)
            .await
            .map_err(|e| MintError::PaymentTokenUnavailable(e.to_string()))?;

        let source = self
            .accounts
            .resolve(requester, &token_mint)
            .await
            .map_err(|e| MintError::AccountResolutionFailed(e.to_string()))?;
        let destination = self
            .accounts
            .resolve(&self.keys.payer_pubkey(), &token_mint)
            .await
            .map_err(|e| MintError::AccountResolutionFailed(e.to_string()))?;

        Ok(PaymentTerms {
            token_mint,
            decimals,
            price_per_unit: self.config.price_per_unit,
            source,
            destination,
        })
    }
}
