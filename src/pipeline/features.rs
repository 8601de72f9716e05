//! Feature engineering and predictor/target separation
//!
//! Two behavioral ratios are derived from the raw usage counts:
//! - `ads_per_song`: ads heard per week relative to songs played per week
//! - `avg_song_length`: daily listening minutes per song played
//!
//! Both denominators carry a `+1` offset so that users with zero songs
//! played produce a finite value instead of a division error. The offset
//! also biases every ratio slightly downward; it is kept exactly as is.

use polars::prelude::*;

use super::columns::{require_columns, strict_cast_column};
use super::error::PrepResult;

/// Numeric predictors, including the two derived ratios.
pub const NUMERIC_FEATURES: [&str; 7] = [
    "age",
    "listening_time",
    "songs_played_per_day",
    "skip_rate",
    "ads_listened_per_week",
    "ads_per_song",
    "avg_song_length",
];

/// Categorical predictors, one-hot encoded by the preprocessor.
pub const CATEGORICAL_FEATURES: [&str; 4] = ["gender", "country", "subscription_type", "device_type"];

/// 0/1 predictors passed through unchanged.
pub const BINARY_FEATURES: [&str; 1] = ["offline_listening"];

/// Churn label.
pub const TARGET_COL: &str = "is_churned";

/// Row identifier, never a predictor.
pub const ID_COL: &str = "user_id";

pub const ADS_PER_SONG: &str = "ads_per_song";
pub const AVG_SONG_LENGTH: &str = "avg_song_length";

/// Denominator offset for both ratios.
pub const ZERO_GUARD_OFFSET: f64 = 1.0;

const DAYS_PER_WEEK: f64 = 7.0;

/// Columns `engineer_features` reads.
const ENGINEERING_INPUTS: [&str; 5] = [
    "offline_listening",
    TARGET_COL,
    "songs_played_per_day",
    "ads_listened_per_week",
    "listening_time",
];

/// Ads heard per song, using an estimated weekly song count.
#[inline]
pub fn ads_per_song(ads_listened_per_week: f64, songs_played_per_day: f64) -> f64 {
    ads_listened_per_week / (songs_played_per_day * DAYS_PER_WEEK + ZERO_GUARD_OFFSET)
}

/// Minutes of listening per song played.
#[inline]
pub fn avg_song_length(listening_time: f64, songs_played_per_day: f64) -> f64 {
    listening_time / (songs_played_per_day + ZERO_GUARD_OFFSET)
}

/// Return a copy of `df` with the binary columns coerced to integers and
/// the two ratio features appended.
///
/// # Errors
/// * `MissingColumn` if any input column is absent
/// * `Cast` if a coerced or ratio input column is not numeric
pub fn engineer_features(df: &DataFrame) -> PrepResult<DataFrame> {
    require_columns(df, &ENGINEERING_INPUTS)?;

    let mut out = df.clone();

    for name in BINARY_FEATURES.iter().chain(std::iter::once(&TARGET_COL)) {
        let coerced = strict_cast_column(&out, name, &DataType::Int64, "Int64")?;
        out.with_column(coerced)?;
    }

    let songs = strict_cast_column(&out, "songs_played_per_day", &DataType::Float64, "Float64")?;
    let ads = strict_cast_column(&out, "ads_listened_per_week", &DataType::Float64, "Float64")?;
    let minutes = strict_cast_column(&out, "listening_time", &DataType::Float64, "Float64")?;
    let songs = songs.f64()?;

    let ads_ratio = ads.f64()? / &(songs * DAYS_PER_WEEK + ZERO_GUARD_OFFSET);
    let length_ratio = minutes.f64()? / &(songs + ZERO_GUARD_OFFSET);

    out.with_column(ads_ratio.with_name(ADS_PER_SONG.into()).into_column())?;
    out.with_column(length_ratio.with_name(AVG_SONG_LENGTH.into()).into_column())?;

    Ok(out)
}

/// Split a frame into the predictor matrix and the churn target.
///
/// The predictors keep every column except `is_churned` and `user_id`, in
/// their original order; the target stays row-aligned with them.
pub fn make_x_y(df: &DataFrame) -> PrepResult<(DataFrame, Series)> {
    require_columns(df, &[TARGET_COL, ID_COL])?;

    let y = df.column(TARGET_COL)?.as_materialized_series().clone();
    let x = df.drop_many([TARGET_COL, ID_COL]);

    Ok((x, y))
}
