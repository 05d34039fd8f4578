/// Lines with at most this many non-whitespace characters are "unimportant":
/// they are skipped by the first line alignment pass and preferred as chunk
/// boundaries.
pub const DEFAULT_UNIMPORTANT_LINE_CHAR_COUNT: usize = 3;

/// After this many changed blocks failed to get inner fragments because they
/// were too big, the remaining blocks of the same request are not attempted.
pub const DEFAULT_MAX_BAD_CHUNKS: usize = 3;

/// Base edit distance budget of a single aligner invocation.
pub const DEFAULT_DELTA_THRESHOLD_SIZE: usize = 20_000;

/// Above this many candidate lines, exact-content lines inside a block are
/// aligned in order instead of searching for the best combination.
pub const MAX_BRUTE_FORCE_ALIGNMENT_SIZE: usize = 10;
