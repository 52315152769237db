// Economy
pub const DEFAULT_STARTING_BALANCE: u64 = 1000;

// Storage layout
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PLAYERS_DIR: &str = "players";
pub const RECORD_EXTENSION: &str = "json";
pub const TEMP_SUFFIX: &str = "tmp";

// Player names
pub const MAX_PLAYER_NAME_LEN: usize = 32;

// Persisted field holding a player's cumulative spend
pub const SPENT_FIELD: &str = "SPENT";

// Config file and environment overrides
pub const CONFIG_FILE_NAME: &str = "cardsharp.toml";
pub const LOG_FILE_NAME: &str = "cardsharp.log";
pub const HOME_DIR_NAME: &str = ".cardsharp";
pub const ENV_DATA_DIR: &str = "CARDSHARP_DATA_DIR";
pub const ENV_PLAYERS_DIR: &str = "CARDSHARP_PLAYERS_DIR";
pub const ENV_STARTING_BALANCE: &str = "CARDSHARP_STARTING_BALANCE";

// Simulator
pub const DEFAULT_SIM_DRAWS: u32 = 100_000;
