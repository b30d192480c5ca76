//! Deterministic per-character color resolution.
//!
//! A [`ColorResolver`] walks a fixed chain of strategies and returns the
//! first color one of them yields:
//!
//! 1. explicit per-character map (exact key, then lowercase key)
//! 2. custom resolver function
//! 3. legacy per-character map (exact key, then lowercase key)
//! 4. palette, cycled by index
//! 5. fallback palette, cycled by index (default `["transparent"]`)
//!
//! Live insertion indexes the palettes with the resolver's sequence cursor,
//! which advances once per resolved character whichever strategy matched.
//! Recoloring indexes them with the cell's buffer position instead and has
//! no side effects, so the same buffer always recolors identically.
//!
//! # Examples
//!
//! ```
//! use chromatext::{ColorResolver, ColorRules, ColorValue};
//!
//! let rules = ColorRules::new()
//!     .with_color_map([("a", "red")])
//!     .with_fallback(["green"]);
//! let mut resolver = ColorResolver::new(rules);
//!
//! assert_eq!(resolver.resolve("a", 0), ColorValue::from("red"));
//! assert_eq!(resolver.resolve("b", 1), ColorValue::from("green"));
//! assert_eq!(resolver.sequence(), 2);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::color::ColorValue;
use crate::error::Result;
use crate::event::{LogLevel, emit_log};

/// Arguments handed to a custom resolver function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveContext<'a> {
    /// The character (grapheme) being colored.
    pub text: &'a str,
    /// Buffer length at the time of resolution.
    pub buffer_len: usize,
    /// Sequence cursor for live insertion, cell position for recoloring.
    pub index: usize,
}

/// Custom resolver function. `Ok(None)` or an empty color means no match.
pub type ResolverFn = dyn Fn(&ResolveContext<'_>) -> Result<Option<ColorValue>> + Send + Sync;

/// One link of the resolution chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Strategy {
    ColorMap,
    Custom,
    LegacyMap,
    Palette,
    Fallback,
}

const CHAIN: [Strategy; 5] = [
    Strategy::ColorMap,
    Strategy::Custom,
    Strategy::LegacyMap,
    Strategy::Palette,
    Strategy::Fallback,
];

/// Configuration of the resolution chain.
#[derive(Clone, Default)]
pub struct ColorRules {
    /// Explicit per-character colors. Highest priority.
    pub color_map: HashMap<String, ColorValue>,
    /// Custom resolver function.
    pub custom: Option<Arc<ResolverFn>>,
    /// Legacy per-character colors, consulted after the custom function.
    pub legacy_map: HashMap<String, ColorValue>,
    /// Ordered palette cycled by index.
    pub palette: Vec<ColorValue>,
    /// Lowest priority palette. Empty behaves as `["transparent"]`.
    pub fallback: Vec<ColorValue>,
}

impl ColorRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_color_map<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ColorValue>,
    {
        self.color_map = collect_map(entries);
        self
    }

    #[must_use]
    pub fn with_legacy_map<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ColorValue>,
    {
        self.legacy_map = collect_map(entries);
        self
    }

    #[must_use]
    pub fn with_custom<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&ResolveContext<'_>) -> Result<Option<ColorValue>> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(resolver));
        self
    }

    #[must_use]
    pub fn with_palette<V: Into<ColorValue>>(mut self, colors: impl IntoIterator<Item = V>) -> Self {
        self.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_fallback<V: Into<ColorValue>>(mut self, colors: impl IntoIterator<Item = V>) -> Self {
        self.fallback = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Run the chain. Always yields a color: the fallback cannot miss.
    fn evaluate(&self, ctx: &ResolveContext<'_>) -> ColorValue {
        CHAIN
            .iter()
            .find_map(|&strategy| self.try_strategy(strategy, ctx))
            .unwrap_or(ColorValue::TRANSPARENT)
    }

    fn try_strategy(&self, strategy: Strategy, ctx: &ResolveContext<'_>) -> Option<ColorValue> {
        match strategy {
            Strategy::ColorMap => lookup(&self.color_map, ctx.text),
            Strategy::Custom => self.call_custom(ctx),
            Strategy::LegacyMap => lookup(&self.legacy_map, ctx.text),
            Strategy::Palette => cycle(&self.palette, ctx.index),
            Strategy::Fallback => {
                cycle(&self.fallback, ctx.index).or(Some(ColorValue::TRANSPARENT))
            }
        }
    }

    fn call_custom(&self, ctx: &ResolveContext<'_>) -> Option<ColorValue> {
        let custom = self.custom.as_ref()?;
        match custom(ctx) {
            Ok(color) => color.filter(|c| !c.is_empty()),
            Err(err) => {
                emit_log(
                    LogLevel::Warn,
                    &format!("custom color resolver failed for {:?}: {err}", ctx.text),
                );
                None
            }
        }
    }
}

impl fmt::Debug for ColorRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorRules")
            .field("color_map", &self.color_map)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .field("legacy_map", &self.legacy_map)
            .field("palette", &self.palette)
            .field("fallback", &self.fallback)
            .finish()
    }
}

fn collect_map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> HashMap<String, ColorValue>
where
    K: Into<String>,
    V: Into<ColorValue>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Exact key first, then the lowercase-folded key.
fn lookup(map: &HashMap<String, ColorValue>, text: &str) -> Option<ColorValue> {
    if map.is_empty() {
        return None;
    }
    let hit = map.get(text).or_else(|| {
        let folded = text.to_lowercase();
        if folded == text {
            None
        } else {
            map.get(&folded)
        }
    });
    hit.filter(|c| !c.is_empty()).cloned()
}

fn cycle(colors: &[ColorValue], index: usize) -> Option<ColorValue> {
    if colors.is_empty() {
        None
    } else {
        Some(colors[index % colors.len()].clone())
    }
}

/// Resolution chain plus the sequence cursor that drives palette cycling.
#[derive(Clone, Debug, Default)]
pub struct ColorResolver {
    rules: ColorRules,
    sequence: usize,
}

impl ColorResolver {
    #[must_use]
    pub fn new(rules: ColorRules) -> Self {
        Self { rules, sequence: 0 }
    }

    /// Resolve a color for live insertion and advance the sequence cursor.
    ///
    /// The cursor advances by exactly one per call, whichever strategy
    /// matched, so it always equals the number of characters resolved since
    /// the last [`reset`](Self::reset).
    pub fn resolve(&mut self, text: &str, buffer_len: usize) -> ColorValue {
        let ctx = ResolveContext {
            text,
            buffer_len,
            index: self.sequence,
        };
        let color = self.rules.evaluate(&ctx);
        self.sequence = self.sequence.wrapping_add(1);
        color
    }

    /// Resolve a color for the cell at `position` without touching the
    /// sequence cursor.
    #[must_use]
    pub fn resolve_deterministic(&self, text: &str, position: usize, buffer_len: usize) -> ColorValue {
        let ctx = ResolveContext {
            text,
            buffer_len,
            index: position,
        };
        self.rules.evaluate(&ctx)
    }

    /// Reset the sequence cursor to zero.
    pub fn reset(&mut self) {
        self.sequence = 0;
    }

    /// Current sequence cursor.
    #[must_use]
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    #[must_use]
    pub fn rules(&self) -> &ColorRules {
        &self.rules
    }

    /// Mutable access to the rules. The sequence cursor is left alone.
    pub fn rules_mut(&mut self) -> &mut ColorRules {
        &mut self.rules
    }

    pub fn set_rules(&mut self, rules: ColorRules) {
        self.rules = rules;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Mutex;

    fn color(s: &str) -> ColorValue {
        ColorValue::from(s)
    }

    #[test]
    fn test_default_fallback_is_transparent() {
        let mut resolver = ColorResolver::default();
        assert_eq!(resolver.resolve("x", 0), ColorValue::TRANSPARENT);
        assert_eq!(resolver.sequence(), 1);
    }

    #[test]
    fn test_fallback_cycles_by_sequence() {
        let mut resolver = ColorResolver::new(ColorRules::new().with_fallback(["red", "blue"]));
        let got: Vec<_> = (0..4).map(|i| resolver.resolve("x", i)).collect();
        assert_eq!(got, vec![color("red"), color("blue"), color("red"), color("blue")]);
    }

    #[test]
    fn test_palette_beats_fallback() {
        let rules = ColorRules::new()
            .with_palette(["p0", "p1"])
            .with_fallback(["f0"]);
        let mut resolver = ColorResolver::new(rules);
        assert_eq!(resolver.resolve("x", 0), color("p0"));
        assert_eq!(resolver.resolve("x", 1), color("p1"));
    }

    #[test]
    fn test_color_map_wins_regardless_of_sequence() {
        let rules = ColorRules::new()
            .with_color_map([("a", "red")])
            .with_palette(["p0", "p1", "p2"]);
        let mut resolver = ColorResolver::new(rules);
        for i in 0..5 {
            assert_eq!(resolver.resolve("a", i), color("red"));
        }
        assert_eq!(resolver.sequence(), 5);
        assert_eq!(resolver.resolve("z", 5), color("p2"));
    }

    #[test]
    fn test_map_lookup_folds_case_after_exact() {
        let rules = ColorRules::new().with_color_map([("a", "lower"), ("B", "upper")]);
        let mut resolver = ColorResolver::new(rules);
        assert_eq!(resolver.resolve("A", 0), color("lower"));
        assert_eq!(resolver.resolve("B", 0), color("upper"));
        // "b" does not fold up to "B".
        assert_eq!(resolver.resolve("b", 0), ColorValue::TRANSPARENT);
    }

    #[test]
    fn test_empty_map_value_is_no_match() {
        let rules = ColorRules::new()
            .with_color_map([("a", "")])
            .with_legacy_map([("a", "legacy")]);
        let mut resolver = ColorResolver::new(rules);
        assert_eq!(resolver.resolve("a", 0), color("legacy"));
    }

    #[test]
    fn test_custom_runs_between_maps() {
        let rules = ColorRules::new()
            .with_color_map([("a", "map")])
            .with_custom(|ctx| Ok((ctx.text != "c").then(|| ColorValue::from("custom"))))
            .with_legacy_map([("b", "legacy"), ("c", "legacy")]);
        let mut resolver = ColorResolver::new(rules);
        assert_eq!(resolver.resolve("a", 0), color("map"));
        assert_eq!(resolver.resolve("b", 0), color("custom"));
        assert_eq!(resolver.resolve("c", 0), color("legacy"));
    }

    #[test]
    fn test_custom_receives_context() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let rules = ColorRules::new().with_custom(move |ctx| {
            sink.lock().unwrap().push((ctx.text.to_string(), ctx.buffer_len, ctx.index));
            Ok(None)
        });
        let mut resolver = ColorResolver::new(rules);
        resolver.resolve("x", 7);
        resolver.resolve("y", 8);
        let _ = resolver.resolve_deterministic("z", 3, 9);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("x".to_string(), 7, 0),
                ("y".to_string(), 8, 1),
                ("z".to_string(), 9, 3),
            ]
        );
    }

    #[test]
    fn test_custom_error_falls_through() {
        let rules = ColorRules::new()
            .with_custom(|_| Err(Error::Resolver("boom".into())))
            .with_palette(["p0"]);
        let mut resolver = ColorResolver::new(rules);
        assert_eq!(resolver.resolve("x", 0), color("p0"));
        assert_eq!(resolver.sequence(), 1);
    }

    #[test]
    fn test_custom_empty_string_is_no_match() {
        let rules = ColorRules::new()
            .with_custom(|_| Ok(Some(ColorValue::from(""))))
            .with_fallback(["fb"]);
        let mut resolver = ColorResolver::new(rules);
        assert_eq!(resolver.resolve("x", 0), color("fb"));
    }

    #[test]
    fn test_deterministic_has_no_side_effect() {
        let mut resolver = ColorResolver::new(ColorRules::new().with_palette(["a", "b", "c"]));
        resolver.resolve("x", 0);
        let before = resolver.sequence();
        assert_eq!(resolver.resolve_deterministic("x", 4, 10), color("b"));
        assert_eq!(resolver.resolve_deterministic("x", 4, 10), color("b"));
        assert_eq!(resolver.sequence(), before);
    }

    #[test]
    fn test_reset() {
        let mut resolver = ColorResolver::new(ColorRules::new().with_palette(["a", "b"]));
        resolver.resolve("x", 0);
        resolver.reset();
        assert_eq!(resolver.sequence(), 0);
        assert_eq!(resolver.resolve("x", 0), color("a"));
    }

    #[test]
    fn test_rules_swap_keeps_sequence() {
        let mut resolver = ColorResolver::new(ColorRules::new().with_color_map([("a", "red")]));
        resolver.resolve("a", 0);
        resolver.resolve("a", 1);
        resolver.resolve("a", 2);
        resolver.set_rules(ColorRules::new().with_palette(["p0", "p1"]));
        // Three characters resolved so far, so the palette continues at index 3.
        assert_eq!(resolver.resolve("a", 3), color("p1"));
    }
}
