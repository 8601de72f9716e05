//! Churn profiling: class balance and churn rate per group

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;

use super::columns::{float_values, require_columns, string_values};
use super::error::PrepResult;
use super::features::TARGET_COL;

/// Label used for null group values.
pub const NULL_GROUP: &str = "null";

/// Class balance of the target column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChurnOverview {
    pub users: usize,
    pub churned: usize,
    pub stayed: usize,
    pub churn_rate: f64,
}

/// Churn rate for users sharing one value of a grouping column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupChurnRate {
    pub value: String,
    pub users: usize,
    pub churn_rate: f64,
}

/// Mean of a numeric column among stayed and churned users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChurnSplitMean {
    pub column: String,
    pub stayed_mean: Option<f64>,
    pub churned_mean: Option<f64>,
}

fn churn_labels(df: &DataFrame) -> PrepResult<Vec<Option<bool>>> {
    Ok(float_values(df, TARGET_COL)?
        .into_iter()
        .map(|v| v.map(|v| v == 1.0))
        .collect())
}

/// Count churned and stayed users. Rows with a null target are not counted.
pub fn churn_overview(df: &DataFrame) -> PrepResult<ChurnOverview> {
    require_columns(df, &[TARGET_COL])?;

    let labels = churn_labels(df)?;
    let churned = labels.iter().filter(|v| **v == Some(true)).count();
    let stayed = labels.iter().filter(|v| **v == Some(false)).count();
    let users = churned + stayed;

    Ok(ChurnOverview {
        users,
        churned,
        stayed,
        churn_rate: if users > 0 { churned as f64 / users as f64 } else { 0.0 },
    })
}

/// Churn rate per distinct value of `column`, ordered by value.
pub fn churn_rate_by(df: &DataFrame, column: &str) -> PrepResult<Vec<GroupChurnRate>> {
    require_columns(df, &[TARGET_COL, column])?;

    let labels = churn_labels(df)?;
    let groups = string_values(df, column)?;

    let mut tally: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for (group, label) in groups.into_iter().zip(labels) {
        let Some(churned) = label else { continue };
        let key = group.unwrap_or_else(|| NULL_GROUP.to_string());
        let entry = tally.entry(key).or_default();
        entry.0 += 1;
        if churned {
            entry.1 += 1;
        }
    }

    Ok(tally
        .into_iter()
        .map(|(value, (users, churned))| GroupChurnRate {
            value,
            users,
            churn_rate: churned as f64 / users as f64,
        })
        .collect())
}

/// Per-class means of each numeric column in `columns`.
pub fn numeric_means_by_churn(df: &DataFrame, columns: &[&str]) -> PrepResult<Vec<ChurnSplitMean>> {
    require_columns(df, &[TARGET_COL])?;
    require_columns(df, columns)?;

    let labels = churn_labels(df)?;
    let mut means = Vec::with_capacity(columns.len());

    for column in columns {
        let mut sums = [(0.0f64, 0usize); 2];
        for (value, label) in float_values(df, column)?.into_iter().zip(labels.iter()) {
            if let (Some(value), Some(churned)) = (value, label) {
                let slot = &mut sums[usize::from(*churned)];
                slot.0 += value;
                slot.1 += 1;
            }
        }
        let mean = |(sum, n): (f64, usize)| if n > 0 { Some(sum / n as f64) } else { None };
        means.push(ChurnSplitMean {
            column: column.to_string(),
            stayed_mean: mean(sums[0]),
            churned_mean: mean(sums[1]),
        });
    }

    Ok(means)
}
