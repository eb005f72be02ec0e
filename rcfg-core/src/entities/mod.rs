pub mod config_entries;
