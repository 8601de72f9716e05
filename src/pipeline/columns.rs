//! Column access helpers shared by the feature, split and preprocessing steps

use polars::prelude::*;

use super::error::{PrepError, PrepResult};

/// Fail with `MissingColumn` for the first name absent from `df`.
pub fn require_columns(df: &DataFrame, columns: &[&str]) -> PrepResult<()> {
    for column in columns {
        if df.get_column_index(column).is_none() {
            return Err(PrepError::MissingColumn {
                column: column.to_string(),
                available: column_names(df),
            });
        }
    }
    Ok(())
}

/// All column names of the frame in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Strictly cast a column and wrap a failure as `PrepError::Cast`.
pub fn strict_cast_column(
    df: &DataFrame,
    column: &str,
    dtype: &DataType,
    target: &'static str,
) -> PrepResult<Column> {
    require_columns(df, &[column])?;
    df.column(column)?
        .strict_cast(dtype)
        .map_err(|source| PrepError::Cast {
            column: column.to_string(),
            target,
            source,
        })
}

/// Values of a numeric column as `f64`, nulls preserved.
pub fn float_values(df: &DataFrame, column: &str) -> PrepResult<Vec<Option<f64>>> {
    let cast = strict_cast_column(df, column, &DataType::Float64, "Float64")?;
    Ok(cast.f64()?.into_iter().collect())
}

/// Values of any column rendered as strings, nulls preserved.
pub fn string_values(df: &DataFrame, column: &str) -> PrepResult<Vec<Option<String>>> {
    let cast = strict_cast_column(df, column, &DataType::String, "String")?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}
