// Log levels understood by the trojan-go engine
pub const LOG_LEVEL_ALL: u8 = 0;
pub const LOG_LEVEL_WARNING: u8 = 2;
