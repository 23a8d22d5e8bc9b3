//! Centralized tuning constants for the ReelQuiz core.
//!
//! These values define the shape of a round and the statistics math.
//! Keeping them together ensures gameplay can only be adjusted via code
//! changes reviewed in version control, rather than through external
//! JSON assets.

// Round shape ----------------------------------------------------------------
pub(crate) const QUESTIONS_PER_ROUND: u32 = 10;

// Question generation --------------------------------------------------------
pub(crate) const RATING_THRESHOLD_MIN: u8 = 5;
pub(crate) const RATING_THRESHOLD_MAX: u8 = 9;

// Statistics -----------------------------------------------------------------
pub(crate) const BEST_GAME_DATE_FORMAT: &str = "%d.%m.%y %H:%M";

// Storage --------------------------------------------------------------------
pub(crate) const STATS_FILE_NAME: &str = "reelquiz-stats.json";
