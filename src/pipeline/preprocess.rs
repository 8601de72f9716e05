//! Column-wise preprocessing plan
//!
//! A [`Preprocessor`] describes which transformer applies to which column.
//! Fitting it on a training partition yields a [`FittedPreprocessor`] whose
//! learned state (means, scales, categories) is read-only: `transform` takes
//! `&self`, so applying the plan to a held-out partition can never feed that
//! partition's statistics back into the plan.
//!
//! Output columns follow the `<group>__<column>` naming scheme:
//! `num__age`, `cat__gender_Female`, `bin__offline_listening`.

use std::collections::{BTreeSet, HashMap};

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::columns::{column_names, float_values, require_columns, string_values};
use super::error::{PrepError, PrepResult};
use super::features::{BINARY_FEATURES, CATEGORICAL_FEATURES, NUMERIC_FEATURES};

/// Below this a fitted standard deviation is treated as zero.
const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

/// How categories not observed during fit are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategoryPolicy {
    /// Encode as all-zero indicators.
    Ignore,
    /// Fail the transform.
    Error,
}

/// What happens to predictor columns outside every group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Leave them out of the output; their names are kept in the fitted state.
    Drop,
    /// Refuse to fit.
    Reject,
}

/// Assignment of predictor columns to transformers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroups {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
    pub binary: Vec<String>,
}

impl ColumnGroups {
    pub fn new<S: AsRef<str>>(numeric: &[S], categorical: &[S], binary: &[S]) -> Self {
        let owned = |cols: &[S]| cols.iter().map(|c| c.as_ref().to_string()).collect();
        Self {
            numeric: owned(numeric),
            categorical: owned(categorical),
            binary: owned(binary),
        }
    }

    /// Every grouped column, numeric first, then categorical, then binary.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .chain(self.categorical.iter())
            .chain(self.binary.iter())
            .map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.all().any(|c| c == column)
    }

    /// Groups must be disjoint.
    pub fn validate(&self) -> PrepResult<()> {
        let mut seen: HashMap<&str, &'static str> = HashMap::new();
        let labelled = [
            ("numeric", &self.numeric),
            ("categorical", &self.categorical),
            ("binary", &self.binary),
        ];
        for (label, columns) in labelled {
            for column in columns {
                if let Some(first) = seen.insert(column.as_str(), label) {
                    return Err(PrepError::OverlappingGroups {
                        column: column.clone(),
                        first,
                        second: label,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Everything a preprocessing plan needs, with every policy spelled out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    pub groups: ColumnGroups,
    pub unknown_categories: UnknownCategoryPolicy,
    pub remainder: RemainderPolicy,
}

/// Unfitted preprocessing plan.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    config: PreprocessorConfig,
}

/// Build the plan used for the churn dataset: standardize numeric columns,
/// one-hot encode categoricals ignoring unseen categories, pass binary
/// columns through, and drop anything else.
pub fn build_preprocessor() -> Preprocessor {
    Preprocessor::new(PreprocessorConfig {
        groups: ColumnGroups::new(&NUMERIC_FEATURES, &CATEGORICAL_FEATURES, &BINARY_FEATURES),
        unknown_categories: UnknownCategoryPolicy::Ignore,
        remainder: RemainderPolicy::Drop,
    })
}

impl Preprocessor {
    pub fn new(config: PreprocessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Learn scaling statistics and category sets from `x`.
    ///
    /// Numeric nulls are skipped; categorical nulls are not treated as a
    /// category.
    pub fn fit(&self, x: &DataFrame) -> PrepResult<FittedPreprocessor> {
        let groups = &self.config.groups;
        groups.validate()?;

        if x.height() == 0 {
            return Err(PrepError::EmptyFrame);
        }

        let grouped: Vec<&str> = groups.all().collect();
        require_columns(x, &grouped)?;

        let remainder: Vec<String> = column_names(x)
            .into_iter()
            .filter(|c| !groups.contains(c))
            .collect();
        if self.config.remainder == RemainderPolicy::Reject && !remainder.is_empty() {
            return Err(PrepError::UncoveredColumns { columns: remainder });
        }

        let scalers = groups
            .numeric
            .iter()
            .map(|column| StandardScaler::fit(x, column))
            .collect::<PrepResult<Vec<_>>>()?;

        let encoders = groups
            .categorical
            .iter()
            .map(|column| OneHotEncoder::fit(x, column))
            .collect::<PrepResult<Vec<_>>>()?;

        Ok(FittedPreprocessor {
            config: self.config.clone(),
            scalers,
            encoders,
            passthrough: groups.binary.clone(),
            dropped_columns: remainder,
            n_rows_fitted: x.height(),
        })
    }
}

/// Fitted mean and scale for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub column: String,
    pub mean: f64,
    /// Population standard deviation, or 1.0 for a constant column.
    pub scale: f64,
}

impl StandardScaler {
    fn fit(x: &DataFrame, column: &str) -> PrepResult<Self> {
        let observed: Vec<f64> = float_values(x, column)?.into_iter().flatten().collect();
        if observed.is_empty() {
            return Err(PrepError::NoObservedValues {
                column: column.to_string(),
            });
        }

        let n = observed.len() as f64;
        let mean = observed.iter().sum::<f64>() / n;
        let variance = observed.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        let scale = if std < ZERO_VARIANCE_TOLERANCE { 1.0 } else { std };

        Ok(Self {
            column: column.to_string(),
            mean,
            scale,
        })
    }

    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }
}

/// Sorted category set observed for one categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    pub column: String,
    pub categories: Vec<String>,
}

impl OneHotEncoder {
    fn fit(x: &DataFrame, column: &str) -> PrepResult<Self> {
        let categories: BTreeSet<String> = string_values(x, column)?.into_iter().flatten().collect();
        Ok(Self {
            column: column.to_string(),
            categories: categories.into_iter().collect(),
        })
    }
}

/// Preprocessing plan with its learned state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPreprocessor {
    config: PreprocessorConfig,
    scalers: Vec<StandardScaler>,
    encoders: Vec<OneHotEncoder>,
    passthrough: Vec<String>,
    dropped_columns: Vec<String>,
    n_rows_fitted: usize,
}

impl FittedPreprocessor {
    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    pub fn scalers(&self) -> &[StandardScaler] {
        &self.scalers
    }

    pub fn encoders(&self) -> &[OneHotEncoder] {
        &self.encoders
    }

    /// Predictor columns seen at fit time that no group covered.
    pub fn dropped_columns(&self) -> &[String] {
        &self.dropped_columns
    }

    pub fn n_rows_fitted(&self) -> usize {
        self.n_rows_fitted
    }

    pub fn n_features_out(&self) -> usize {
        self.scalers.len()
            + self.encoders.iter().map(|e| e.categories.len()).sum::<usize>()
            + self.passthrough.len()
    }

    /// Output column names in output order.
    pub fn feature_names_out(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.n_features_out());
        names.extend(self.scalers.iter().map(|s| format!("num__{}", s.column)));
        for encoder in &self.encoders {
            names.extend(
                encoder
                    .categories
                    .iter()
                    .map(|cat| format!("cat__{}_{}", encoder.column, cat)),
            );
        }
        names.extend(self.passthrough.iter().map(|c| format!("bin__{}", c)));
        names
    }

    /// Apply the learned plan to `x`, producing one Float64 column per
    /// output feature. Only grouped columns are read.
    pub fn transform(&self, x: &DataFrame) -> PrepResult<DataFrame> {
        let grouped: Vec<&str> = self.config.groups.all().collect();
        require_columns(x, &grouped)?;

        let mut columns: Vec<Column> = Vec::with_capacity(self.n_features_out());

        for scaler in &self.scalers {
            let scaled: Vec<Option<f64>> = float_values(x, &scaler.column)?
                .into_iter()
                .map(|v| v.map(|v| scaler.apply(v)))
                .collect();
            columns.push(Column::new(format!("num__{}", scaler.column).into(), scaled));
        }

        for encoder in &self.encoders {
            columns.extend(self.encode(x, encoder)?);
        }

        for column in &self.passthrough {
            let values = float_values(x, column)?;
            columns.push(Column::new(format!("bin__{}", column).into(), values));
        }

        Ok(DataFrame::new(columns)?)
    }

    fn encode(&self, x: &DataFrame, encoder: &OneHotEncoder) -> PrepResult<Vec<Column>> {
        let values = string_values(x, &encoder.column)?;
        let index: HashMap<&str, usize> = encoder
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut indicators = vec![vec![0.0f64; values.len()]; encoder.categories.len()];
        for (row, value) in values.iter().enumerate() {
            let Some(value) = value else { continue };
            match index.get(value.as_str()) {
                Some(&slot) => indicators[slot][row] = 1.0,
                None if self.config.unknown_categories == UnknownCategoryPolicy::Error => {
                    return Err(PrepError::UnknownCategory {
                        column: encoder.column.clone(),
                        value: value.clone(),
                    });
                }
                None => {}
            }
        }

        Ok(encoder
            .categories
            .iter()
            .zip(indicators)
            .map(|(cat, values)| {
                Column::new(format!("cat__{}_{}", encoder.column, cat).into(), values)
            })
            .collect())
    }
}
