// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use portfolio_dashboard_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            status: 502,
            message: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "API error (502): bad gateway");
    }

    #[test]
    fn api_error_empty_message() {
        let err = CoreError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.to_string(), "API error (500): ");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("buffer overflow".into());
        assert_eq!(err.to_string(), "Serialization error: buffer overflow");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("ticker must not be empty".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: ticker must not be empty"
        );
    }

    #[test]
    fn stock_not_found() {
        let err = CoreError::StockNotFound(42);
        assert_eq!(err.to_string(), "Stock not found: 42");
    }

    #[test]
    fn portfolio_not_found() {
        let err = CoreError::PortfolioNotFound(7);
        assert_eq!(err.to_string(), "Portfolio not found: 7");
    }

    #[test]
    fn merge_partially_applied() {
        let err = CoreError::MergePartiallyApplied {
            ticker: "AAPL".into(),
            source_id: 3,
            detail: "connection reset".into(),
        };
        assert_eq!(
            err.to_string(),
            "Merge partially applied: AAPL was updated but stock 3 could not be deleted: connection reset"
        );
    }
}

// ── Debug trait ─────────────────────────────────────────────────────

mod debug_trait {
    use super::*;

    #[test]
    fn all_variants_are_debug() {
        // Ensure Debug is derived and doesn't panic
        let variants: Vec<CoreError> = vec![
            CoreError::Api {
                status: 404,
                message: "m".into(),
            },
            CoreError::Network("test".into()),
            CoreError::Serialization("test".into()),
            CoreError::Deserialization("test".into()),
            CoreError::FileIO("test".into()),
            CoreError::ValidationError("test".into()),
            CoreError::StockNotFound(1),
            CoreError::PortfolioNotFound(2),
            CoreError::MergePartiallyApplied {
                ticker: "T".into(),
                source_id: 3,
                detail: "d".into(),
            },
        ];

        for variant in &variants {
            let debug = format!("{:?}", variant);
            assert!(!debug.is_empty());
        }
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_io_error_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let core_err: CoreError = io_err.into();
        match &core_err {
            CoreError::FileIO(msg) => assert!(msg.contains("file not found")),
            other => panic!("Expected FileIO, got {:?}", other),
        }
    }

    #[test]
    fn from_io_error_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let core_err: CoreError = io_err.into();
        match &core_err {
            CoreError::FileIO(msg) => assert!(msg.contains("access denied")),
            other => panic!("Expected FileIO, got {:?}", other),
        }
    }

    #[test]
    fn from_io_error_preserves_message() {
        let msg = "custom IO error with special chars: ąść";
        let io_err = std::io::Error::other(msg);
        let core_err: CoreError = io_err.into();
        match &core_err {
            CoreError::FileIO(m) => assert!(m.contains(msg)),
            other => panic!("Expected FileIO, got {:?}", other),
        }
    }

    #[test]
    fn from_serde_json_error() {
        // Trigger a real serde_json error
        let result: Result<String, _> = serde_json::from_str("{{invalid json");
        let json_err = result.unwrap_err();
        let core_err: CoreError = json_err.into();
        match &core_err {
            CoreError::Deserialization(msg) => {
                assert!(!msg.is_empty());
                // serde_json errors include line/column info
            }
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn from_serde_json_error_eof() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("");
        let json_err = result.unwrap_err();
        let core_err: CoreError = json_err.into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(msg.contains("EOF")),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn from_reqwest_builder_error() {
        // An unparseable URL yields a reqwest::Error without touching the network
        let reqwest_err = reqwest::Client::new()
            .get("http://[not-a-host")
            .build()
            .unwrap_err();
        let core_err: CoreError = reqwest_err.into();
        match &core_err {
            CoreError::Network(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Network, got {:?}", other),
        }
    }
}

// ── Error is std::error::Error ──────────────────────────────────────

mod std_error {
    use super::*;

    #[test]
    fn core_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::Network("test".into()));
        // Should compile and Display should work
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn core_error_implements_send() {
        fn assert_send<T: Send>() {}
        assert_send::<CoreError>();
    }

    #[test]
    fn core_error_implements_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<CoreError>();
    }
}

// ── Edge cases ──────────────────────────────────────────────────────

mod edge_cases {
    use super::*;

    #[test]
    fn very_long_error_message() {
        let long_msg = "x".repeat(10_000);
        let err = CoreError::Network(long_msg.clone());
        assert_eq!(err.to_string(), format!("Network error: {}", long_msg));
    }

    #[test]
    fn unicode_in_error_message() {
        let err = CoreError::Api {
            status: 503,
            message: "接続エラー".into(),
        };
        assert_eq!(err.to_string(), "API error (503): 接続エラー");
    }

    #[test]
    fn newlines_in_error_message() {
        let err = CoreError::FileIO("line1\nline2\nline3".into());
        let display = err.to_string();
        assert!(display.contains("line1\nline2\nline3"));
    }

    #[test]
    fn merge_partially_applied_with_special_chars() {
        let err = CoreError::MergePartiallyApplied {
            ticker: "BRK/B".into(),
            source_id: 9,
            detail: "timeout after 30s: ETIMEDOUT".into(),
        };
        let display = err.to_string();
        assert!(display.contains("BRK/B"));
        assert!(display.contains("ETIMEDOUT"));
    }
}
