// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

pub const DEFAULT_ICON: &str = "📦";
pub const DEFAULT_COLOR: &str = "#9E9E9E";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub icon: &'static str,
    pub color: &'static str,
}

impl CategoryStyle {
    pub const DEFAULT: CategoryStyle = CategoryStyle {
        icon: DEFAULT_ICON,
        color: DEFAULT_COLOR,
    };
}

// Order matters for the substring fallback: first hit wins.
static KNOWN: &[(&str, CategoryStyle)] = &[
    ("food", style("🍔", "#FF9800")),
    ("groceries", style("🛒", "#8BC34A")),
    ("dining", style("🍽️", "#FF5722")),
    ("transportation", style("🚗", "#2196F3")),
    ("transport", style("🚗", "#2196F3")),
    ("shopping", style("🛍️", "#E91E63")),
    ("entertainment", style("🎬", "#9C27B0")),
    ("utilities", style("💡", "#FFC107")),
    ("bills", style("🧾", "#FFC107")),
    ("rent", style("🏠", "#795548")),
    ("housing", style("🏠", "#795548")),
    ("healthcare", style("🏥", "#F44336")),
    ("health", style("🏥", "#F44336")),
    ("education", style("📚", "#3F51B5")),
    ("travel", style("✈️", "#00BCD4")),
    ("insurance", style("🛡️", "#607D8B")),
    ("subscriptions", style("📱", "#673AB7")),
    ("gifts", style("🎁", "#FF4081")),
    ("salary", style("💰", "#4CAF50")),
    ("freelance", style("💼", "#009688")),
    ("investment", style("📈", "#00897B")),
    ("savings", style("🏦", "#43A047")),
];

const fn style(icon: &'static str, color: &'static str) -> CategoryStyle {
    CategoryStyle { icon, color }
}

/// Display icon and color for a free-text category name.
///
/// Exact (case-insensitive) match first, then containment in either
/// direction, then [`CategoryStyle::DEFAULT`]. Never fails.
pub fn resolve(name: &str) -> CategoryStyle {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return CategoryStyle::DEFAULT;
    }
    if let Some((_, s)) = KNOWN.iter().find(|(k, _)| *k == needle) {
        return *s;
    }
    KNOWN
        .iter()
        .find(|(k, _)| needle.contains(k) || k.contains(needle.as_str()))
        .map(|(_, s)| *s)
        .unwrap_or(CategoryStyle::DEFAULT)
}

/// Backend-provided icon/color take precedence; the resolver fills whatever is missing.
pub fn resolve_with(name: &str, icon: Option<&str>, color: Option<&str>) -> (String, String) {
    let fallback = resolve(name);
    let icon = icon
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(fallback.icon);
    let color = color
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(fallback.color);
    (icon.to_string(), color.to_string())
}

pub fn known() -> impl Iterator<Item = (&'static str, CategoryStyle)> {
    KNOWN.iter().copied()
}
