use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{self, UNION_HEADS};
use crate::error::{Result, SchemaError};
use crate::family::{EnvelopeShape, Family};
use crate::wire::Layout;

/// Registry key: family, primary tag and, for nested unions, the
/// secondary discriminant read from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VariantKey {
    pub family: Family,
    pub tag: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<u32>,
}

impl VariantKey {
    pub const fn new(family: Family, tag: u16) -> Self {
        Self {
            family,
            tag,
            secondary: None,
        }
    }

    pub const fn nested(family: Family, tag: u16, secondary: u32) -> Self {
        Self {
            family,
            tag,
            secondary: Some(secondary),
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:#06x}", self.family, self.tag)?;
        if let Some(secondary) = self.secondary {
            write!(f, "/{secondary}")?;
        }
        Ok(())
    }
}

/// Whether a variant is produced by the driver or submitted to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Receive,
    Transmit,
}

/// One registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSpec {
    pub key: VariantKey,
    pub name: &'static str,
    pub layout: &'static Layout,
    pub direction: Direction,
}

/// Location of a secondary discriminant inside a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector {
    pub offset: usize,
    /// Width in bytes: 1, 2 or 4.
    pub width: usize,
}

impl Selector {
    /// Read the discriminant from a payload, or `None` when it is too short.
    pub fn read(&self, payload: &[u8]) -> Option<u32> {
        let bytes = payload.get(self.offset..self.offset + self.width)?;
        let mut word = [0u8; 4];
        word[..bytes.len()].copy_from_slice(bytes);
        Some(u32::from_le_bytes(word))
    }
}

/// A primary tag whose payload is a nested tagged union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnionHead {
    pub family: Family,
    pub tag: u16,
    pub name: &'static str,
    pub selector: Selector,
}

/// Immutable map from registry keys to payload layouts.
#[derive(Debug)]
pub struct TagRegistry {
    ordered: Vec<&'static VariantSpec>,
    by_key: HashMap<VariantKey, &'static VariantSpec>,
    heads: HashMap<(Family, u16), &'static UnionHead>,
}

static GLOBAL: LazyLock<Result<TagRegistry>> =
    LazyLock::new(|| TagRegistry::build(catalog::all_variants(), UNION_HEADS));

impl TagRegistry {
    /// The process-wide registry over the built-in catalog, built on first
    /// use.
    pub fn global() -> Result<&'static TagRegistry> {
        GLOBAL.as_ref().map_err(Clone::clone)
    }

    /// Build a registry, rejecting duplicate keys and variants that
    /// disagree with the union heads.
    pub fn build(
        variants: impl IntoIterator<Item = &'static VariantSpec>,
        heads: &'static [UnionHead],
    ) -> Result<Self> {
        let mut head_map = HashMap::with_capacity(heads.len());
        for head in heads {
            if head_map.insert((head.family, head.tag), head).is_some() {
                return Err(SchemaError::DuplicateKey(VariantKey::new(
                    head.family,
                    head.tag,
                )));
            }
        }

        let mut ordered = Vec::new();
        let mut by_key = HashMap::new();
        for spec in variants {
            let nested = head_map.contains_key(&(spec.key.family, spec.key.tag));
            if nested != spec.key.secondary.is_some() {
                return Err(SchemaError::InconsistentUnion(spec.key));
            }
            if by_key.insert(spec.key, spec).is_some() {
                return Err(SchemaError::DuplicateKey(spec.key));
            }
            ordered.push(spec);
        }

        debug!(
            variants = ordered.len(),
            union_heads = head_map.len(),
            "built tag registry"
        );

        Ok(Self {
            ordered,
            by_key,
            heads: head_map,
        })
    }

    /// Resolve the payload variant of a record.
    ///
    /// `payload` is the record body after the envelope; it is only read
    /// when `tag` opens a nested union.
    pub fn resolve(
        &self,
        family: Family,
        tag: u16,
        payload: &[u8],
    ) -> Result<&'static VariantSpec> {
        let key = match self.heads.get(&(family, tag)) {
            Some(head) => {
                let secondary =
                    head.selector
                        .read(payload)
                        .ok_or_else(|| SchemaError::Truncated {
                            layout: head.name,
                            needed: head.selector.offset + head.selector.width,
                            available: payload.len(),
                        })?;
                VariantKey::nested(family, tag, secondary)
            }
            None => VariantKey::new(family, tag),
        };
        self.get(&key).ok_or(SchemaError::UnknownKey(key))
    }

    pub fn get(&self, key: &VariantKey) -> Option<&'static VariantSpec> {
        self.by_key.get(key).copied()
    }

    pub fn union_head(&self, family: Family, tag: u16) -> Option<&'static UnionHead> {
        self.heads.get(&(family, tag)).copied()
    }

    pub fn envelope(&self, family: Family) -> EnvelopeShape {
        family.envelope()
    }

    /// All rows in catalog order.
    pub fn variants(&self) -> impl Iterator<Item = &'static VariantSpec> + '_ {
        self.ordered.iter().copied()
    }

    pub fn variants_of(
        &self,
        family: Family,
    ) -> impl Iterator<Item = &'static VariantSpec> + '_ {
        self.variants().filter(move |spec| spec.key.family == family)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
