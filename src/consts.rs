/// Number of slots in a deck. Metrics and scores exist only for full decks.
pub const DECK_SIZE: usize = 8;

/// Separator used by deck share codes (`hog,log,zap,...`).
pub const SHARE_CODE_SEPARATOR: char = ',';

/// Separator for the tag column of CSV catalogs.
pub const CSV_TAG_SEPARATOR: char = ';';

// Role tags
pub const TAG_WIN: &str = "win";
pub const TAG_SPELL: &str = "spell";
pub const TAG_AIR: &str = "air";
pub const TAG_SWARM: &str = "swarm";
pub const TAG_SUPPORT: &str = "support";
pub const TAG_BUILDING: &str = "building";
pub const TAG_EVOLUTION: &str = "evolution";

// Combat tags (offense/defense only)
pub const TAG_TANK: &str = "tank";
pub const TAG_HEAVY: &str = "heavy";
pub const TAG_CONTROL: &str = "control";
pub const TAG_STUN: &str = "stun";

/// Canonical average elixir cost rewarded by elixir fitness.
pub const DEFAULT_TARGET_ELIXIR: f32 = 3.8;

/// Minimum score gain for a swap to be suggested.
pub const DEFAULT_SUGGESTION_THRESHOLD: i32 = 8;

/// Maximum number of suggestions returned per search.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Offense/defense accumulations are divided by `deck_len * COMBAT_NORMALIZER`.
pub const COMBAT_NORMALIZER: f32 = 1.5;
