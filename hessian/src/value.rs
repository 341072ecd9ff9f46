//! Values that can be written by the [`Encoder`].
//!
//! [`Value`] is a closed sum type over everything the Hessian 1.0 format can represent. Maps and
//! lists are shared handles: cloning one shares the underlying storage and, with it, the identity
//! that the encoder uses to detect repeated and circular references.
//!
//! [`Encoder`]: crate::Encoder

use hessian_bytes::Bytes;
use indexmap::IndexMap;
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::{Duration, SystemTime, UNIX_EPOCH},
};


/// Type name of an untyped map.
///
/// An annotated map using this name is written with an empty type, exactly like a plain [`Map`].
pub const DEFAULT_MAP_TYPE: &str = "java.util.HashMap";

/// Type name of an untyped list.
///
/// An annotated list using this name is written with an empty type, exactly like a plain [`List`].
pub const DEFAULT_LIST_TYPE: &str = "java.util.ArrayList";

/// A value that can be encoded.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    Bool(bool),
    /// An integral number, written as an `int` or a `long` depending on its magnitude.
    Int(i64),
    /// A floating point number.
    ///
    /// `NaN` is written as null, and integral values are written like [`Value::Int`].
    Double(f64),
    String(String),
    Bytes(Bytes),
    Date(Date),
    List(List),
    Map(Map),
    /// A value annotated with an explicit wire type.
    Typed(Typed),
}

impl Value {
    /// Creates a [`Value::Typed`] with the given type name and payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hessian::Value;
    ///
    /// let value = Value::typed("long", 5);
    /// let Value::Typed(typed) = &value else { unreachable!() };
    /// assert_eq!(typed.type_name(), "long");
    /// assert_eq!(typed.payload(), &Value::Int(5));
    /// ```
    #[must_use]
    pub fn typed(type_name: impl Into<String>, payload: impl Into<Self>) -> Self {
        Self::Typed(Typed::new(type_name, payload))
    }

    /// Returns a short name for the kind of this value, as used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Typed(_) => "typed value",
        }
    }

    /// Returns `true` if this value is written as null.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Double(value) => value.is_nan(),
            _ => false,
        }
    }
}

macro_rules! from_integer {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )+
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! from_wide_integer {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                #[allow(clippy::cast_precision_loss)]
                fn from(value: $t) -> Self {
                    i64::try_from(value).map_or(Self::Double(value as f64), Self::Int)
                }
            }
        )+
    };
}

from_wide_integer!(u64, isize, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Double(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(Bytes::copy_from_slice(value))
    }
}

impl From<Date> for Value {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<SystemTime> for Value {
    fn from(value: SystemTime) -> Self {
        Self::Date(Date::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(List::from(value))
    }
}

impl From<List> for Value {
    fn from(value: List) -> Self {
        Self::List(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Self::Map(value)
    }
}

impl From<Typed> for Value {
    fn from(value: Typed) -> Self {
        Self::Typed(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A point in time, as milliseconds since the Unix epoch.
///
/// # Examples
///
/// ```rust
/// use hessian::Date;
/// use std::time::{Duration, SystemTime, UNIX_EPOCH};
///
/// let date = Date::from(UNIX_EPOCH + Duration::from_millis(1_500));
/// assert_eq!(date.as_millis(), 1_500);
/// assert_eq!(SystemTime::from(date), UNIX_EPOCH + Duration::from_millis(1_500));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i64);

impl Date {
    /// Creates a new [`Date`] from milliseconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the milliseconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the current time.
    #[must_use]
    pub fn now() -> Self {
        Self::from(SystemTime::now())
    }
}

impl From<i64> for Date {
    fn from(millis: i64) -> Self {
        Self::from_millis(millis)
    }
}

impl From<Date> for i64 {
    fn from(value: Date) -> Self {
        value.0
    }
}

impl From<SystemTime> for Date {
    fn from(value: SystemTime) -> Self {
        // Saturate instead of wrapping for times more than 292 million years away.
        match value.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => Self(i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)),
            Err(before) => Self(
                i64::try_from(before.duration().as_millis()).map_or(i64::MIN, |millis| -millis),
            ),
        }
    }
}

impl From<Date> for SystemTime {
    fn from(value: Date) -> Self {
        let offset = Duration::from_millis(value.0.unsigned_abs());
        if value.0 < 0 {
            UNIX_EPOCH - offset
        } else {
            UNIX_EPOCH + offset
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// A value annotated with an explicit wire type.
///
/// The type name selects the writer through the [`TypeRegistry`]: standard names such as `int`
/// or `long` force a primitive wire type, while class names attached to a [`Map`] or [`List`]
/// are written in the type block of the composite.
///
/// [`TypeRegistry`]: crate::TypeRegistry
#[derive(Debug, Clone, PartialEq)]
pub struct Typed {
    type_name: String,
    payload: Box<Value>,
}

impl Typed {
    /// Creates a new [`Typed`] value.
    #[must_use]
    pub fn new(type_name: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            type_name: type_name.into(),
            payload: Box::new(payload.into()),
        }
    }

    /// Returns the type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the annotated payload.
    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

/// An ordered sequence of values with shared ownership.
///
/// Clones point to the same storage, so pushing through one handle is visible through all of
/// them, and the encoder treats them as the same object.
///
/// # Examples
///
/// ```rust
/// use hessian::{List, Value};
///
/// let list = List::new();
/// let alias = list.clone();
/// alias.push(1);
/// assert_eq!(list.get(0), Some(Value::Int(1)));
/// assert_eq!(list, alias);
/// assert_ne!(list, List::from(vec![Value::Int(1)]));
/// ```
#[derive(Clone, Default)]
pub struct List {
    inner: Arc<RwLock<Vec<Value>>>,
}

impl List {
    /// Creates an empty [`List`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to the end of the list.
    pub fn push(&self, value: impl Into<Value>) {
        self.write().push(value.into());
    }

    /// Returns a clone of the element at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.read().get(index).cloned()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns a copy of the elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.read().clone()
    }

    /// Returns `true` if both handles point to the same list.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.inner).cast::<()>() as usize
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Value>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Vec<Value>> for List {
    fn from(value: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }
}

impl<V> FromIterator<V> for List
where
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Self::from(iter.into_iter().map(Into::into).collect::<Vec<_>>())
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for List {}

impl fmt::Debug for List {
    // Elements are left out, since a list may contain itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("id", &format_args!("{:#x}", self.id()))
            .field("len", &self.len())
            .finish()
    }
}

/// A collection of key-value pairs with shared ownership.
///
/// Entries keep their insertion order, which is also the order in which they are encoded.
/// Clones point to the same storage, and the encoder treats them as the same object.
///
/// # Examples
///
/// ```rust
/// use hessian::{Map, Value};
///
/// let map = Map::new();
/// assert_eq!(map.insert("a", 1), None);
/// assert_eq!(map.insert("b", 2), None);
/// assert_eq!(map.insert("a", 3), Some(Value::Int(1)));
/// assert_eq!(map.keys(), vec![Value::from("a"), Value::from("b")]);
/// assert_eq!(map.get("a"), Some(Value::Int(3)));
/// ```
#[derive(Clone, Default)]
pub struct Map {
    inner: Arc<RwLock<IndexMap<MapKey, Value>>>,
}

impl Map {
    /// Creates an empty [`Map`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key already exists, its value is replaced in place and the old one is returned.
    pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        self.write().insert(MapKey(key.into()), value.into())
    }

    /// Returns a clone of the value associated with `key`, if it exists.
    pub fn get(&self, key: impl Into<Value>) -> Option<Value> {
        self.read().get(&MapKey(key.into())).cloned()
    }

    /// Removes the entry associated with `key`, returning its value.
    ///
    /// The remaining entries keep their order.
    pub fn remove(&self, key: impl Into<Value>) -> Option<Value> {
        self.write().shift_remove(&MapKey(key.into()))
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> Vec<Value> {
        self.read().keys().map(|key| key.0.clone()).collect()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns `true` if both handles point to the same map.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.inner).cast::<()>() as usize
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, IndexMap<MapKey, Value>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<MapKey, Value>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A [`Value`] used as a [`Map`] key.
///
/// Keys compare like values, except that doubles compare by their bits, so `NaN` equals itself
/// and the comparison agrees with the hash. Maps and lists compare and hash by identity.
#[derive(Debug, Clone)]
pub(crate) struct MapKey(Value);

impl MapKey {
    pub(crate) fn value(&self) -> &Value {
        &self.0
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        same_key(&self.0, &other.0)
    }
}

impl Eq for MapKey {}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_key(&self.0, state);
    }
}

fn same_key(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Double(a), Value::Double(b)) => key_bits(*a) == key_bits(*b),
        (Value::Typed(a), Value::Typed(b)) => {
            a.type_name == b.type_name && same_key(&a.payload, &b.payload)
        }
        _ => a == b,
    }
}

fn hash_key<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Null => {}
        Value::Bool(value) => value.hash(state),
        Value::Int(value) => value.hash(state),
        Value::Double(value) => key_bits(*value).hash(state),
        Value::String(value) => value.hash(state),
        Value::Bytes(value) => value.hash(state),
        Value::Date(value) => value.hash(state),
        Value::List(list) => list.id().hash(state),
        Value::Map(map) => map.id().hash(state),
        Value::Typed(typed) => {
            typed.type_name.hash(state);
            hash_key(&typed.payload, state);
        }
    }
}

/// Returns the bits of a double key, with every `NaN` mapped to one pattern.
fn key_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        // Adding zero turns -0.0 into 0.0.
        (value + 0.0).to_bits()
    }
}

impl<K, V> FromIterator<(K, V)> for Map
where
    K: Into<Value>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let map = Self::new();
        for (key, value) in iter {
            _ = map.insert(key, value);
        }
        map
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Map {}

impl fmt::Debug for Map {
    // Entries are left out, since a map may contain itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("id", &format_args!("{:#x}", self.id()))
            .field("len", &self.len())
            .finish()
    }
}
