pub mod merge_service;
