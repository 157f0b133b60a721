//! The homogeneous, index-addressable list behind every list-valued DOM property.
use crate::access::{Guarded, MasterKey};
use crate::error::{DomError, DomResult};
use crate::types::{Element, ValueType};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::ops::Index;

/// One constructor argument: a single element, or a run of elements that is
/// spliced in place (one level only).
#[derive(Debug, Clone, PartialEq)]
pub enum Part<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Element> From<&TypedList<T>> for Part<T> {
    fn from(list: &TypedList<T>) -> Self {
        Part::Many(list.as_slice().to_vec())
    }
}

/// An ordered sequence whose elements all conform to one declared type.
#[derive(Debug)]
pub struct TypedList<T: Element> {
    element_type: ValueType,
    items: Guarded<Vec<T>>,
}

impl<T: Element> TypedList<T> {
    /// Builds a list from `parts`.
    ///
    /// With `element_type` given every element is checked against it, and a
    /// type no `T` could ever satisfy is refused outright. Without
    /// it the type is taken from the first element and the rest are checked
    /// against that; an empty input then has nothing to infer from.
    ///
    /// A key is returned only for a read-only list.
    pub fn create(
        parts: impl IntoIterator<Item = Part<T>>,
        element_type: Option<ValueType>,
        read_only: bool,
    ) -> DomResult<(Self, Option<MasterKey>)> {
        let mut items = Vec::new();
        for part in parts {
            match part {
                Part::One(item) => items.push(item),
                Part::Many(run) => items.extend(run),
            }
        }

        let element_type = match element_type {
            Some(declared) if T::admits(declared) => declared,
            Some(declared) => {
                return Err(DomError::Configuration {
                    msg: format!("a {} cannot hold elements of type {}", T::LIST_NAME, declared),
                })
            }
            None => match items.first() {
                Some(first) => first.value_type(),
                None => {
                    return Err(DomError::Configuration {
                        msg: format!("cannot infer the element type of an empty {}", T::LIST_NAME),
                    })
                }
            },
        };
        for item in &items {
            check_conforms(element_type, item)?;
        }

        let (items, key) = Guarded::new(items, T::LIST_NAME, read_only);
        Ok((Self { element_type, items }, key))
    }

    /// A writable list typed after its first element.
    pub fn new(items: impl IntoIterator<Item = T>) -> DomResult<Self> {
        let (list, _) = Self::create(items.into_iter().map(Part::One), None, false)?;
        Ok(list)
    }

    /// A writable list with an explicit element type.
    pub fn with_type(element_type: ValueType, items: impl IntoIterator<Item = T>) -> DomResult<Self> {
        let (list, _) = Self::create(items.into_iter().map(Part::One), Some(element_type), false)?;
        Ok(list)
    }

    /// A writable empty list.
    pub fn empty(element_type: ValueType) -> DomResult<Self> {
        Self::with_type(element_type, Vec::new())
    }

    /// A read-only list for element types whose value type is fixed by `T`
    /// itself, so no per-element check can fail.
    pub(super) fn locked_static(element_type: ValueType, items: Vec<T>) -> (Self, MasterKey) {
        let (items, key) = Guarded::locked(items, T::LIST_NAME);
        (Self { element_type, items }, key)
    }

    // --- Reads ---

    pub fn element_type(&self) -> ValueType { self.element_type }

    pub fn is_read_only(&self) -> bool { self.items.is_read_only() }

    #[inline(always)]
    pub fn len(&self) -> usize { self.items.read().len() }

    pub fn is_empty(&self) -> bool { self.items.read().is_empty() }

    pub fn as_slice(&self) -> &[T] { self.items.read() }

    pub fn iter(&self) -> std::slice::Iter<'_, T> { self.items.read().iter() }

    /// The element at `index`, or `None` outside `[0, len)`. Negative indices
    /// are out of range; they do not count from the end.
    pub fn item(&self, index: isize) -> Option<&T> {
        usize::try_from(index).ok().and_then(|i| self.items.read().get(i))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.items.read().contains(value)
    }

    /// The position of the *last* element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.items.read().iter().rposition(|item| item == value)
    }

    // --- Derived lists ---

    /// A new writable list holding `self` followed by `other`.
    pub fn concat(&self, other: &TypedList<T>) -> DomResult<Self> {
        if !other.element_type.conforms_to(self.element_type) {
            return Err(DomError::type_mismatch(self.element_type, other.element_type));
        }
        let mut items = Vec::with_capacity(self.len() + other.len());
        items.extend_from_slice(self.as_slice());
        items.extend_from_slice(other.as_slice());
        Ok(self.derive(items))
    }

    /// A new writable list holding `self` repeated `times` times.
    ///
    /// Fails with a Configuration error when the result could not be
    /// allocated; the count is never trusted to fit.
    pub fn repeat(&self, times: usize) -> DomResult<Self> {
        if self.is_empty() || times == 0 {
            return Ok(self.derive(Vec::new()));
        }
        let too_long = || DomError::Configuration {
            msg: format!("{} repeated {} times is too long", T::LIST_NAME, times),
        };
        let total = self.len().checked_mul(times).ok_or_else(too_long)?;
        let mut items = Vec::new();
        items.try_reserve_exact(total).map_err(|_| too_long())?;
        for _ in 0..times {
            items.extend_from_slice(self.as_slice());
        }
        Ok(self.derive(items))
    }

    /// A new list with the same elements and the same read-only flag. A fresh
    /// key is issued for a read-only copy; the original's key does not open it.
    pub fn copy(&self) -> (Self, Option<MasterKey>) {
        self.duplicate(self.as_slice().to_vec())
    }

    /// As [`TypedList::copy`], with every element deep-cloned.
    pub fn deep_copy(&self) -> (Self, Option<MasterKey>) {
        self.duplicate(self.iter().map(Element::deep_clone).collect())
    }

    fn derive(&self, items: Vec<T>) -> Self {
        Self {
            element_type: self.element_type,
            items: Guarded::open(items, T::LIST_NAME),
        }
    }

    fn duplicate(&self, items: Vec<T>) -> (Self, Option<MasterKey>) {
        let (items, key) = Guarded::new(items, T::LIST_NAME, self.is_read_only());
        (Self { element_type: self.element_type, items }, key)
    }

    // --- Writes (open lists only) ---

    /// Inserts `item` before `index`; an index past the end appends.
    pub fn insert(&mut self, index: usize, item: T) -> DomResult<()> {
        self.insert_with(None, index, item)
    }

    pub fn append(&mut self, item: T) -> DomResult<()> {
        self.insert_with(None, usize::MAX, item)
    }

    /// Appends every item, or none of them if any fails the type check.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) -> DomResult<()> {
        self.extend_with(None, items.into_iter().collect())
    }

    pub fn set_item(&mut self, index: usize, item: T) -> DomResult<T> {
        self.set_item_with(None, index, item)
    }

    pub fn remove(&mut self, index: usize) -> DomResult<T> {
        self.remove_with(None, index)
    }

    pub fn clear(&mut self) -> DomResult<()> {
        self.clear_with(None)
    }

    /// Presents `key` once and returns a writer that may modify the list
    /// whatever its read-only flag.
    pub fn unlock<'a>(&'a mut self, key: &'a MasterKey) -> DomResult<Writer<'a, T>> {
        self.items.check(Some(key))?;
        Ok(Writer { list: self, key })
    }

    fn insert_with(&mut self, key: Option<&MasterKey>, index: usize, item: T) -> DomResult<()> {
        let element_type = self.element_type;
        self.items.mutate(key, |items| {
            check_conforms(element_type, &item)?;
            let at = index.min(items.len());
            items.insert(at, item);
            Ok(())
        })
    }

    fn extend_with(&mut self, key: Option<&MasterKey>, batch: Vec<T>) -> DomResult<()> {
        let element_type = self.element_type;
        self.items.mutate(key, |items| {
            for item in &batch {
                check_conforms(element_type, item)?;
            }
            items.extend(batch);
            Ok(())
        })
    }

    fn set_item_with(&mut self, key: Option<&MasterKey>, index: usize, item: T) -> DomResult<T> {
        let element_type = self.element_type;
        self.items.mutate(key, |items| {
            let length = items.len();
            let slot = items.get_mut(index).ok_or(DomError::IndexSize { index, length })?;
            check_conforms(element_type, &item)?;
            Ok(std::mem::replace(slot, item))
        })
    }

    fn remove_with(&mut self, key: Option<&MasterKey>, index: usize) -> DomResult<T> {
        self.items.mutate(key, |items| {
            if index >= items.len() {
                return Err(DomError::IndexSize { index, length: items.len() });
            }
            Ok(items.remove(index))
        })
    }

    fn clear_with(&mut self, key: Option<&MasterKey>) -> DomResult<()> {
        self.items.mutate(key, |items| {
            items.clear();
            Ok(())
        })
    }
}

fn check_conforms<T: Element>(declared: ValueType, item: &T) -> DomResult<()> {
    let actual = item.value_type();
    if actual.conforms_to(declared) {
        Ok(())
    } else {
        Err(DomError::type_mismatch(declared, actual))
    }
}

/// Write access to a list, obtained by presenting its master key.
pub struct Writer<'a, T: Element> {
    list: &'a mut TypedList<T>,
    key: &'a MasterKey,
}

impl<T: Element> Writer<'_, T> {
    pub fn insert(&mut self, index: usize, item: T) -> DomResult<()> {
        self.list.insert_with(Some(self.key), index, item)
    }

    pub fn append(&mut self, item: T) -> DomResult<()> {
        self.list.insert_with(Some(self.key), usize::MAX, item)
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) -> DomResult<()> {
        self.list.extend_with(Some(self.key), items.into_iter().collect())
    }

    pub fn set_item(&mut self, index: usize, item: T) -> DomResult<T> {
        self.list.set_item_with(Some(self.key), index, item)
    }

    pub fn remove(&mut self, index: usize) -> DomResult<T> {
        self.list.remove_with(Some(self.key), index)
    }

    pub fn clear(&mut self) -> DomResult<()> {
        self.list.clear_with(Some(self.key))
    }
}

impl<T: Element> PartialEq for TypedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.element_type == other.element_type && self.as_slice() == other.as_slice()
    }
}

impl<T: Element> Index<usize> for TypedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<'a, T: Element> IntoIterator for &'a TypedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Element> fmt::Display for TypedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.iter().map(|item| format!("{:?}", item)).collect::<Vec<_>>().join(", ");
        write!(f, "{}[ {} ]", T::LIST_NAME, body)
    }
}

impl<T: Element + Serialize> Serialize for TypedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct(T::LIST_NAME, 3)?;
        state.serialize_field("element_type", &self.element_type)?;
        state.serialize_field("read_only", &self.is_read_only())?;
        state.serialize_field("items", self.as_slice())?;
        state.end()
    }
}
