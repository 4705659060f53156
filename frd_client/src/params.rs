use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Corporate-action adjustment applied to price series.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    Split,
    Dividend,
    #[default]
    SplitDividend,
}

impl Adjustment {
    /// Wire value of the `adjustment` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Adjustment::Split => "adj_split",
            Adjustment::Dividend => "adj_div",
            Adjustment::SplitDividend => "adj_splitdiv",
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Adjustment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adj_split" => Ok(Adjustment::Split),
            "adj_div" => Ok(Adjustment::Dividend),
            "adj_splitdiv" => Ok(Adjustment::SplitDividend),
            other => Err(format!("unknown adjustment: {other}")),
        }
    }
}

/// Bar interval accepted by the `timeframe` query parameter.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BarInterval {
    OneMinute,
    FiveMinute,
    ThirtyMinute,
    OneHour,
    #[default]
    OneDay,
}

impl BarInterval {
    /// Wire value of the `timeframe` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarInterval::OneMinute => "1min",
            BarInterval::FiveMinute => "5min",
            BarInterval::ThirtyMinute => "30min",
            BarInterval::OneHour => "1hour",
            BarInterval::OneDay => "1day",
        }
    }
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1min" => Ok(BarInterval::OneMinute),
            "5min" => Ok(BarInterval::FiveMinute),
            "30min" => Ok(BarInterval::ThirtyMinute),
            "1hour" => Ok(BarInterval::OneHour),
            "1day" => Ok(BarInterval::OneDay),
            other => Err(format!("unknown bar interval: {other}")),
        }
    }
}

/// Ordered query-parameter set for one request.
///
/// Keys are the fixed parameter vocabulary of the remote API, so they are
/// `'static`; values are rendered to strings by the caller.
#[derive(Clone, Debug, Default)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, builder style.
    pub fn push(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.0.push((key, value.into()));
        self
    }

    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }

    /// Looks up the first value recorded under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}
