//! Resource totals: ore, food, water, waste, energy.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::fields::as_int;

/// The ore types the game knows.
pub const ORE_TYPES: [&str; 20] = [
    "chromite",
    "monazite",
    "anthracite",
    "halite",
    "rutile",
    "chalcopyrite",
    "magnetite",
    "trona",
    "zircon",
    "gold",
    "fluorite",
    "goethite",
    "sulfur",
    "methane",
    "beryl",
    "bauxite",
    "kerogen",
    "uraninite",
    "gypsum",
    "galena",
];

/// The food types the game knows.
pub const FOOD_TYPES: [&str; 22] = [
    "burger", "potato", "bean", "meal", "bread", "cider", "beetle", "wheat",
    "cheese", "lapis", "chip", "corn", "syrup", "fungus", "shake", "root",
    "pie", "algae", "milk", "apple", "pancake", "soup",
];

/// Per-type amounts over a fixed list of type names.
///
/// Every known type is present from the start with amount 0. Names not in
/// the list are kept too, since the server may add types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Amounts(BTreeMap<String, i64>);

impl Amounts {
    /// All of `types` at zero.
    pub fn zeroed(types: &[&str]) -> Self {
        Self(types.iter().map(|t| (t.to_string(), 0)).collect())
    }

    /// The amount of `kind`; unknown kinds read as 0.
    pub fn get(&self, kind: &str) -> i64 {
        self.0.get(kind).copied().unwrap_or(0)
    }

    pub fn set(&mut self, kind: &str, amount: i64) {
        self.0.insert(kind.to_string(), amount);
    }

    pub fn add(&mut self, kind: &str, amount: i64) {
        *self.0.entry(kind.to_string()).or_insert(0) += amount;
    }

    /// Adds every `type: amount` pair of a JSON object. Unreadable amounts
    /// count as 0; a non-object adds nothing.
    pub fn add_all(&mut self, amounts: &Value) {
        if let Some(map) = amounts.as_object() {
            for (kind, amount) in map {
                self.add(kind, as_int(amount).unwrap_or(0));
            }
        }
    }

    pub fn total(&self) -> i64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Totals of each resource, with ore and food broken down by type.
///
/// Used both for hourly rates and for stored amounts. Rates can be
/// negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resources {
    pub ore: i64,
    pub food: i64,
    pub water: i64,
    pub waste: i64,
    pub energy: i64,
    pub ores: Amounts,
    pub foods: Amounts,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            ore: 0,
            food: 0,
            water: 0,
            waste: 0,
            energy: 0,
            ores: Amounts::zeroed(&ORE_TYPES),
            foods: Amounts::zeroed(&FOOD_TYPES),
        }
    }
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }
}
