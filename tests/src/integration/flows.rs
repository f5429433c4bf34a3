//! # Integration Test Flows
//!
//! Tests that the gateway, the core workflows, and the store port hold the
//! service's consistency properties together:
//!
//! 1. **Join accounting**: a successful join deducts exactly the entry fee
//!    and leaves exactly one matching Debit record.
//! 2. **Idempotence**: re-joins and re-redemptions are rejected without
//!    further balance changes.
//! 3. **No lost updates**: interleaved joins by different users each settle
//!    their own fee correctly.
//! 4. **Partial failure**: a history-write failure after a wallet credit is
//!    surfaced as a 500 while the credit remains, making the documented
//!    no-rollback behavior observable.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arena_core::{CoreServices, RewardConfig};
    use arena_gateway::{GatewayConfig, GatewayService};
    use arena_store::{
        DocumentStore, MemoryStore, StorePath, TxnOutcome, UpdateFn,
    };
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Map, Value};
    use shared_types::StoreError;
    use tower::util::ServiceExt;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn path(segments: &[&str]) -> StorePath {
        segments
            .iter()
            .fold(StorePath::root(), |p, s| p.child(*s).unwrap())
    }

    fn router_over(store: Arc<dyn DocumentStore>) -> Router {
        let services = CoreServices::new(store, RewardConfig::default());
        GatewayService::new(GatewayConfig::default(), services)
            .expect("default config is valid")
            .router()
    }

    fn seed_user(store: &MemoryStore, uid: &str, code: &str, balance: i64) {
        store
            .seed(
                &path(&["users", uid]),
                json!({
                    "referCode": code,
                    "wallet": { "greenDiamondBalance": balance }
                }),
            )
            .unwrap();
    }

    fn balance_of(store: &MemoryStore, uid: &str) -> i64 {
        store
            .snapshot(&path(&["users", uid, "wallet", "greenDiamondBalance"]))
            .unwrap()
            .and_then(|v| v.as_i64())
            .unwrap_or(0)
    }

    fn history_records(store: &MemoryStore, uid: &str) -> Vec<Value> {
        store
            .snapshot(&path(&["walletHistory", uid]))
            .unwrap()
            .and_then(|v| v.as_object().map(|m| m.values().cloned().collect()))
            .unwrap_or_default()
    }

    async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Store wrapper that fails every history append, for exercising the
    /// credit-then-record failure window.
    struct HistoryWritesFail {
        inner: Arc<MemoryStore>,
    }

    #[async_trait::async_trait]
    impl DocumentStore for HistoryWritesFail {
        async fn get(&self, p: &StorePath) -> Result<Option<Value>, StoreError> {
            self.inner.get(p).await
        }
        async fn patch(&self, p: &StorePath, f: Map<String, Value>) -> Result<(), StoreError> {
            self.inner.patch(p, f).await
        }
        async fn increment(&self, p: &StorePath, d: i64) -> Result<(), StoreError> {
            self.inner.increment(p, d).await
        }
        async fn append_child(&self, _: &StorePath, _: Value) -> Result<String, StoreError> {
            Err(StoreError::Unavailable("injected append failure".into()))
        }
        async fn conditional_update(
            &self,
            p: &StorePath,
            apply: UpdateFn<'_>,
        ) -> Result<TxnOutcome, StoreError> {
            self.inner.conditional_update(p, apply).await
        }
        async fn query_equal(
            &self,
            p: &StorePath,
            k: &str,
            e: &str,
        ) -> Result<Vec<(String, Value)>, StoreError> {
            self.inner.query_equal(p, k, e).await
        }
        fn server_timestamp(&self) -> Value {
            self.inner.server_timestamp()
        }
    }

    // =========================================================================
    // JOIN ACCOUNTING
    // =========================================================================

    /// The worked example: t1 costs 50, u1 holds 100. After the join the
    /// balance is 50 with one Debit record of 50; the identical second call
    /// is rejected with no further change.
    #[tokio::test]
    async fn test_join_accounting_and_idempotence() {
        let store = Arc::new(MemoryStore::new());
        store
            .seed(&path(&["tournaments", "t1"]), json!({ "entryFee": 50 }))
            .unwrap();
        seed_user(&store, "u1", "U1CODE", 100);
        let router = router_over(store.clone());

        let (status, body) = post(
            &router,
            "/api/join-tournament",
            json!({ "userId": "u1", "tournamentId": "t1" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(balance_of(&store, "u1"), 50);

        let records = history_records(&store, "u1");
        assert_eq!(records.len(), 1, "exactly one Debit record");
        assert_eq!(records[0]["type"], "Debit");
        assert_eq!(records[0]["amount"], 50);
        assert_eq!(records[0]["transactionId"], "t1");

        let (status, body) = post(
            &router,
            "/api/join-tournament",
            json!({ "userId": "u1", "tournamentId": "t1" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Already joined!");
        assert_eq!(balance_of(&store, "u1"), 50, "no double deduction");
        assert_eq!(history_records(&store, "u1").len(), 1);
    }

    /// A join the user cannot afford must not mutate balance, participants,
    /// or history.
    #[tokio::test]
    async fn test_unaffordable_join_mutates_nothing() {
        let store = Arc::new(MemoryStore::new());
        store
            .seed(&path(&["tournaments", "t1"]), json!({ "entryFee": 500 }))
            .unwrap();
        seed_user(&store, "u1", "U1CODE", 100);
        let router = router_over(store.clone());

        let (status, body) = post(
            &router,
            "/api/join-tournament",
            json!({ "userId": "u1", "tournamentId": "t1" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Insufficient Balance");
        assert_eq!(balance_of(&store, "u1"), 100);
        assert!(store
            .snapshot(&path(&["tournaments", "t1", "participants"]))
            .unwrap()
            .is_none());
        assert!(history_records(&store, "u1").is_empty());
    }

    /// Interleaved joins by two users each holding exactly their own fee:
    /// both succeed and neither balance is corrupted.
    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_joins_no_lost_updates() {
        let store = Arc::new(MemoryStore::new());
        store
            .seed(&path(&["tournaments", "t1"]), json!({ "entryFee": 50 }))
            .unwrap();
        seed_user(&store, "u1", "U1CODE", 50);
        seed_user(&store, "u2", "U2CODE", 50);
        let router = router_over(store.clone());

        let tasks = ["u1", "u2"].map(|uid| {
            let router = router.clone();
            tokio::spawn(async move {
                post(
                    &router,
                    "/api/join-tournament",
                    json!({ "userId": uid, "tournamentId": "t1" }),
                )
                .await
            })
        });
        for task in tasks {
            let (status, body) = task.await.unwrap();
            assert_eq!(status, StatusCode::OK, "both joins succeed: {body}");
        }

        assert_eq!(balance_of(&store, "u1"), 0);
        assert_eq!(balance_of(&store, "u2"), 0);
        let participants = store
            .snapshot(&path(&["tournaments", "t1", "participants"]))
            .unwrap()
            .unwrap();
        assert_eq!(participants.as_object().unwrap().len(), 2);
    }

    // =========================================================================
    // REFERRAL CONSISTENCY
    // =========================================================================

    /// Redeeming twice: the second call is a conflict and the total bonus
    /// credited across both calls equals exactly one bonus amount.
    #[tokio::test]
    async fn test_double_redemption_credits_once() {
        let store = Arc::new(MemoryStore::new());
        seed_user(&store, "newbie", "NEW111", 0);
        seed_user(&store, "veteran", "VET999", 0);
        seed_user(&store, "other", "OTH333", 0);
        let router = router_over(store.clone());

        let (status, _) = post(
            &router,
            "/api/redeem-referral",
            json!({ "code": "VET999", "userId": "newbie" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post(
            &router,
            "/api/redeem-referral",
            json!({ "code": "OTH333", "userId": "newbie" }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Already referred.");

        assert_eq!(balance_of(&store, "newbie"), 100, "exactly one bonus");
        assert_eq!(balance_of(&store, "veteran"), 100);
        assert_eq!(balance_of(&store, "other"), 0);
        assert_eq!(history_records(&store, "newbie").len(), 1);
    }

    /// The worked example: a user whose own referCode is "ABC123" can never
    /// redeem it, whatever else is in the tree.
    #[tokio::test]
    async fn test_self_referral_always_fails() {
        let store = Arc::new(MemoryStore::new());
        seed_user(&store, "u2", "ABC123", 500);
        seed_user(&store, "bystander", "XYZ777", 0);
        let router = router_over(store.clone());

        let (status, body) = post(
            &router,
            "/api/redeem-referral",
            json!({ "code": "ABC123", "userId": "u2" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Cannot use own code.");
        assert_eq!(balance_of(&store, "u2"), 500);
        assert!(store
            .snapshot(&path(&["users", "u2", "referredBy"]))
            .unwrap()
            .is_none());
    }

    // =========================================================================
    // REWARD CLAIMS
    // =========================================================================

    /// Claims are unbounded: each one credits the fixed amount and appends
    /// its own record.
    #[tokio::test]
    async fn test_repeat_reward_claims_accumulate() {
        let store = Arc::new(MemoryStore::new());
        let router = router_over(store.clone());

        for _ in 0..3 {
            let (status, _) = post(&router, "/api/claim-reward", json!({ "uid": "u1" })).await;
            assert_eq!(status, StatusCode::OK);
        }
        assert_eq!(balance_of(&store, "u1"), 30);
        assert_eq!(history_records(&store, "u1").len(), 3);
    }

    // =========================================================================
    // PARTIAL FAILURE
    // =========================================================================

    /// When the history write fails after the wallet credit, the request
    /// surfaces a 500 but the credit stays applied. This pins down the
    /// documented no-rollback behavior so a future change to it is loud.
    #[tokio::test]
    async fn test_history_failure_leaves_credit_applied() {
        let inner = Arc::new(MemoryStore::new());
        let store = Arc::new(HistoryWritesFail {
            inner: inner.clone(),
        });
        let router = router_over(store);

        let (status, body) = post(&router, "/api/claim-reward", json!({ "uid": "u1" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Server Error");

        assert_eq!(balance_of(&inner, "u1"), 10, "credit is not rolled back");
        assert!(history_records(&inner, "u1").is_empty());
    }
}
