//! This module defines the transaction-request endpoints, one per mint flow.
//!
//! * `GET  <path>` returns the wallet label and icon.
//! * `POST <path>` returns a partially signed mint transaction.
//! * Any other method is answered with `405`.
use crate::{
    api::controllers::mint,
    models::{ApiError, AppState, MintAccountRequest, MintFlow},
};
use actix_web::{web, HttpResponse, Responder};

async fn get_metadata(data: web::ThinData<AppState>) -> impl Responder {
    mint::get_metadata(&data)
}

async fn create_mint_transaction(
    flow: web::Data<MintFlow>,
    query: Option<web::Query<Vec<(String, String)>>>,
    body: Option<web::Json<MintAccountRequest>>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    mint::create_mint_transaction(
        **flow,
        query.map(web::Query::into_inner).unwrap_or_default(),
        body.map(web::Json::into_inner),
        &data,
    )
    .await
}

async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}

/// Registers the endpoints of every mint flow.
pub fn init(cfg: &mut web::ServiceConfig) {
    for flow in MintFlow::ALL {
        cfg.service(
            web::resource(flow.path())
                .app_data(web::Data::new(flow))
                .route(web::get().to(get_metadata))
                .route(web::post().to(create_mint_transaction))
                .default_service(web::to(method_not_allowed)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::MintConfig,
        domain::{decode_transaction, signer_set, MintService},
        models::{ErrorResponse, MintMetadataResponse, MintResponse},
        services::{
            find_template_creator, LocalSigner, MintTemplate, MockAssociatedAccountResolverTrait,
            MockSolanaProviderTrait, MockTemplateRegistryTrait, ServiceKeys, SolanaProviderError,
        },
    };
    use actix_web::{http::StatusCode, test, App};
    use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Keypair};
    use spl_associated_token_account::get_associated_token_address;
    use std::sync::Arc;

    fn template() -> MintTemplate {
        let address = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();
        let (creator, creator_bump) = find_template_creator(&address, &program_id);
        MintTemplate {
            address,
            program_id,
            authority: Pubkey::new_unique(),
            wallet: Pubkey::new_unique(),
            creator,
            creator_bump,
        }
    }

    fn working_mocks() -> (
        MockSolanaProviderTrait,
        MockTemplateRegistryTrait,
        MockAssociatedAccountResolverTrait,
    ) {
        let mut provider = MockSolanaProviderTrait::new();
        provider
            .expect_get_latest_blockhash()
            .returning(|| Box::pin(async { Ok(Hash::new_unique()) }));
        provider
            .expect_get_token_decimals()
            .returning(|_| Box::pin(async { Ok(6) }));

        let template = template();
        let mut registry = MockTemplateRegistryTrait::new();
        registry.expect_get_template().returning(move || {
            let template = template.clone();
            Box::pin(async move { Ok(template) })
        });

        let mut accounts = MockAssociatedAccountResolverTrait::new();
        accounts.expect_resolve().returning(|owner, mint| {
            let address = get_associated_token_address(owner, mint);
            Box::pin(async move { Ok(address) })
        });

        (provider, registry, accounts)
    }

    /// Mocks that fail the test if any collaborator is reached.
    fn untouched_mocks() -> (
        MockSolanaProviderTrait,
        MockTemplateRegistryTrait,
        MockAssociatedAccountResolverTrait,
    ) {
        let mut provider = MockSolanaProviderTrait::new();
        provider.expect_get_latest_blockhash().never();
        provider.expect_get_token_decimals().never();
        let mut registry = MockTemplateRegistryTrait::new();
        registry.expect_get_template().never();
        let mut accounts = MockAssociatedAccountResolverTrait::new();
        accounts.expect_resolve().never();
        (provider, registry, accounts)
    }

    fn app_state(
        (provider, registry, accounts): (
            MockSolanaProviderTrait,
            MockTemplateRegistryTrait,
            MockAssociatedAccountResolverTrait,
        ),
    ) -> AppState {
        let config = MintConfig::default();
        let metadata = config.metadata();
        let service = MintService::new(
            Arc::new(provider),
            Arc::new(registry),
            Arc::new(accounts),
            ServiceKeys::new(LocalSigner::new(Keypair::new())),
            config,
        );
        AppState {
            mint_service: Arc::new(service),
            metadata,
        }
    }

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::ThinData($state))
                    .configure(init),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_get_returns_metadata_on_every_endpoint() {
        let app = init_app!(app_state(untouched_mocks()));

        for flow in MintFlow::ALL {
            let req = test::TestRequest::get().uri(flow.path()).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);

            let body: MintMetadataResponse = test::read_body_json(resp).await;
            assert_eq!(body.label, "Dinos 'R' Us 🦖");
            assert_eq!(body.icon, "https://freesvg.org/img/DINO-01.png");
        }
    }

    #[actix_web::test]
    async fn test_other_methods_are_rejected() {
        let app = init_app!(app_state(untouched_mocks()));

        for flow in MintFlow::ALL {
            for req in [
                test::TestRequest::put().uri(flow.path()),
                test::TestRequest::delete().uri(flow.path()),
                test::TestRequest::patch().uri(flow.path()),
            ] {
                let resp = test::call_service(&app, req.to_request()).await;
                assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
                let body: ErrorResponse = test::read_body_json(resp).await;
                assert_eq!(body.error, "Method not allowed");
            }
        }
    }

    #[actix_web::test]
    async fn test_missing_account_is_rejected_before_any_call() {
        let app = init_app!(app_state(untouched_mocks()));

        for flow in MintFlow::ALL {
            let req = test::TestRequest::post()
                .uri(&format!("{}?quantity=1", flow.path()))
                .set_json(serde_json::json!({}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(body.error, "No account provided");
        }
    }

    #[actix_web::test]
    async fn test_malformed_account_is_rejected() {
        let app = init_app!(app_state(untouched_mocks()));

        let req = test::TestRequest::post()
            .uri(MintFlow::Delegated.path())
            .set_json(serde_json::json!({ "account": "Addr1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Invalid account");
    }

    #[actix_web::test]
    async fn test_invalid_quantity_is_rejected_before_any_call() {
        let app = init_app!(app_state(untouched_mocks()));
        let account = Pubkey::new_unique().to_string();

        for query in ["", "?quantity=0", "?quantity=-1", "?quantity=abc", "?quantity=4", "?quantity=1&quantity=2"] {
            let req = test::TestRequest::post()
                .uri(&format!("{}{query}", MintFlow::Gated.path()))
                .set_json(serde_json::json!({ "account": account }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "query {query:?}");
        }
    }

    #[actix_web::test]
    async fn test_delegated_post_returns_partial_transaction() {
        let app = init_app!(app_state(working_mocks()));
        let account = Pubkey::new_unique();

        let req = test::TestRequest::post()
            .uri(MintFlow::Delegated.path())
            .set_json(serde_json::json!({ "account": account.to_string() }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: MintResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, "Mint a DINO! 🦖");
        let tx = decode_transaction(&body.transaction).unwrap();
        assert!(signer_set(&tx).contains(&account));
        assert_eq!(tx.message.instructions.len(), 1);
    }

    #[actix_web::test]
    async fn test_gated_post_with_quantity_three() {
        let app = init_app!(app_state(working_mocks()));

        let req = test::TestRequest::post()
            .uri("/api/mint?quantity=3")
            .set_json(serde_json::json!({ "account": Pubkey::new_unique().to_string() }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: MintResponse = test::read_body_json(resp).await;
        let tx = decode_transaction(&body.transaction).unwrap();
        assert_eq!(tx.message.instructions.len(), 4);
        assert_eq!(signer_set(&tx).len(), 5);
    }

    #[actix_web::test]
    async fn test_internal_failure_hides_cause() {
        let (_, registry, accounts) = working_mocks();
        let mut provider = MockSolanaProviderTrait::new();
        provider.expect_get_latest_blockhash().returning(|| {
            Box::pin(async { Err(SolanaProviderError::NetworkError("10.0.0.7 refused".into())) })
        });
        let app = init_app!(app_state((provider, registry, accounts)));

        let req = test::TestRequest::post()
            .uri(MintFlow::SelfPaid.path())
            .set_json(serde_json::json!({ "account": Pubkey::new_unique().to_string() }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "error creating transaction");
    }
}
