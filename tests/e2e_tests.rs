//! End-to-end integration tests
//!
//! These tests drive the full engine through its public API: account
//! directory, ledger mutations, deferred cheque settlement, history export,
//! and the best-effort persistence boundary. Settlement tests use short real
//! delays and await the definitive outcome.

#[cfg(test)]
mod tests {
    use atm_ledger::{
        JsonLineStore, LedgerEngine, LedgerError, MemorySink, SettlementHandle,
        SettlementOutcome, UnavailableStore,
    };
    use rstest::rstest;
    use std::fs;
    use std::sync::Arc;
    use std::time::Duration;

    fn engine_with_sink() -> (Arc<LedgerEngine>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let engine = Arc::new(LedgerEngine::new(sink.clone()));
        (engine, sink)
    }

    /// Scenario seeds: deposit, rejected withdrawal, accepted withdrawal
    #[test]
    fn test_interactive_session_flow() {
        let (engine, _) = engine_with_sink();
        engine.open_account("priyanshu", 1234, 10000).unwrap();

        // Deposit(500) -> 10500
        let entry = engine.deposit("priyanshu", 500).unwrap();
        assert_eq!(entry.to_string(), "Deposited Rs500 (Balance: Rs10500)");
        assert_eq!(engine.balance("priyanshu").unwrap(), 10500);

        // Withdraw(20000) -> InsufficientFunds, balance unchanged
        let result = engine.withdraw("priyanshu", 20000);
        assert_eq!(
            result.unwrap_err(),
            LedgerError::insufficient_funds(10500, 20000)
        );
        assert_eq!(engine.balance("priyanshu").unwrap(), 10500);

        // Withdraw(500) -> 10000
        let entry = engine.withdraw("priyanshu", 500).unwrap();
        assert_eq!(entry.to_string(), "Withdrew Rs500 (Balance: Rs10000)");
        assert_eq!(engine.balance("priyanshu").unwrap(), 10000);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-100)]
    fn test_non_positive_amounts_never_mutate(#[case] amount: i64) {
        let (engine, sink) = engine_with_sink();
        engine.open_account("priyanshu", 1234, 10000).unwrap();
        let records_before = sink.records().len();

        assert!(engine.deposit("priyanshu", amount).is_err());
        assert!(engine.withdraw("priyanshu", amount).is_err());

        assert_eq!(engine.balance("priyanshu").unwrap(), 10000);
        assert!(engine.mini_statement("priyanshu").unwrap().is_empty());
        assert_eq!(sink.records().len(), records_before);
    }

    /// Scenario seed: scheduled cheque clears and is mirrored to persistence
    #[tokio::test]
    async fn test_cheque_settlement_completes() {
        let (engine, sink) = engine_with_sink();
        engine.open_account("priyanshu", 1234, 10000).unwrap();

        let handle = engine
            .deposit_cheque("priyanshu", 1000, Duration::from_millis(20))
            .unwrap();

        // the caller is not blocked while the cheque clears
        engine.deposit("priyanshu", 500).unwrap();

        let outcome = handle.outcome().await;
        assert!(matches!(outcome, SettlementOutcome::Completed { amount: 1000, .. }));
        assert_eq!(engine.balance("priyanshu").unwrap(), 11500);
        assert!(sink
            .records()
            .iter()
            .any(|(account, detail)| account == "priyanshu" && detail == "Cheque cleared: Rs1000"));
    }

    /// Scenario seed: cancelled cheque credits nothing
    #[tokio::test]
    async fn test_cheque_settlement_cancelled_before_commit() {
        let (engine, sink) = engine_with_sink();
        engine.open_account("priyanshu", 1234, 10000).unwrap();

        let handle = engine
            .deposit_cheque("priyanshu", 1000, Duration::from_secs(60))
            .unwrap();
        handle.cancel();

        assert_eq!(handle.outcome().await, SettlementOutcome::Aborted { amount: 1000 });
        assert_eq!(engine.balance("priyanshu").unwrap(), 10000);
        assert!(engine.mini_statement("priyanshu").unwrap().is_empty());
        assert!(!sink
            .records()
            .iter()
            .any(|(_, detail)| detail.starts_with("Cheque cleared")));
    }

    #[tokio::test]
    async fn test_concurrent_cheques_are_independent_credits() {
        let (engine, _) = engine_with_sink();
        engine.open_account("priyanshu", 1234, 10000).unwrap();

        let handles: Vec<_> = (1..=5)
            .map(|i| {
                engine
                    .deposit_cheque("priyanshu", i * 100, Duration::from_millis(5 * i as u64))
                    .unwrap()
            })
            .collect();

        let outcomes =
            futures::future::join_all(handles.into_iter().map(SettlementHandle::outcome)).await;

        assert!(outcomes
            .iter()
            .all(|o| matches!(o, SettlementOutcome::Completed { .. })));
        // 10000 + 100 + 200 + 300 + 400 + 500
        assert_eq!(engine.balance("priyanshu").unwrap(), 11500);
        assert_eq!(engine.mini_statement("priyanshu").unwrap().len(), 5);
    }

    #[test]
    fn test_concurrent_interactive_deposits() {
        use std::thread;

        let (engine, _) = engine_with_sink();
        engine.open_account("priyanshu", 1234, 10000).unwrap();

        let mut threads = vec![];
        for _ in 0..20 {
            let engine = Arc::clone(&engine);
            threads.push(thread::spawn(move || {
                for _ in 0..5 {
                    engine.deposit("priyanshu", 7).unwrap();
                }
            }));
        }
        for thread in threads {
            thread.join().unwrap();
        }

        assert_eq!(engine.balance("priyanshu").unwrap(), 10000 + 20 * 5 * 7);
    }

    #[test]
    fn test_export_matches_mini_statement_suffix() {
        let (engine, _) = engine_with_sink();
        engine.open_account("priyanshu", 1234, 0).unwrap();
        for i in 1..=8 {
            engine.deposit("priyanshu", i * 10).unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");
        let count = engine.export_history("priyanshu", &path).unwrap();
        assert_eq!(count, 8);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        let exported: Vec<&str> = content.lines().collect();
        assert_eq!(exported.len(), 8);

        // the mini statement is the suffix of the export, same relative order
        let statement: Vec<String> = engine
            .mini_statement("priyanshu")
            .unwrap()
            .iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(statement, exported[3..].to_vec());
    }

    /// Scenario seed: interest projection at the fixed 4% rate
    #[test]
    fn test_interest_quote_report() {
        let (engine, _) = engine_with_sink();
        engine.open_account("priyanshu", 1234, 10000).unwrap();

        let quote = engine.interest_quote("priyanshu", 2).unwrap();

        assert_eq!(
            quote.to_string(),
            "Principal: Rs10000.00\n\
             Rate: 4.00% per annum\n\
             Years: 2\n\
             Interest: Rs800.00\n\
             Estimated balance: Rs10800.00"
        );
    }

    #[test]
    fn test_unavailable_store_degrades_silently() {
        let engine = LedgerEngine::new(Arc::new(UnavailableStore));
        engine.open_account("priyanshu", 1234, 10000).unwrap();

        engine.deposit("priyanshu", 500).unwrap();
        engine.withdraw("priyanshu", 200).unwrap();
        engine.change_pin("priyanshu", 1234, 4321).unwrap();

        // the in-memory ledger stays authoritative and complete
        assert_eq!(engine.balance("priyanshu").unwrap(), 10300);
        assert_eq!(engine.mini_statement("priyanshu").unwrap().len(), 2);
    }

    #[test]
    fn test_json_line_store_mirrors_session_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let engine = LedgerEngine::new(Arc::new(JsonLineStore::new(&path)));

        engine.open_account("priyanshu", 1234, 10000).unwrap();
        engine.deposit("priyanshu", 500).unwrap();
        engine.withdraw("priyanshu", 200).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let details: Vec<String> = content
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["detail"].as_str().unwrap().to_string()
            })
            .collect();

        assert_eq!(
            details,
            vec![
                "Account created - initial balance Rs10000",
                "Deposited Rs500 (Balance: Rs10500)",
                "Withdrew Rs200 (Balance: Rs10300)",
            ]
        );
    }

    #[test]
    fn test_accounts_are_isolated() {
        let (engine, _) = engine_with_sink();
        engine.open_account("alice", 1111, 1000).unwrap();
        engine.open_account("bob", 2222, 2000).unwrap();

        engine.deposit("alice", 500).unwrap();
        engine.withdraw("bob", 300).unwrap();

        assert_eq!(engine.balance("alice").unwrap(), 1500);
        assert_eq!(engine.balance("bob").unwrap(), 1700);
        assert_eq!(engine.mini_statement("alice").unwrap().len(), 1);
        assert_eq!(engine.mini_statement("bob").unwrap().len(), 1);
    }
}
