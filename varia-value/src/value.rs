//! The dynamic value type.

use core::cmp::Ordering;
use core::fmt;
use core::ops;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ValueError;
use crate::format::{bool_to_string, integer_to_string, real_to_string, unsigned_to_string};
use crate::iter::{Members, MembersMut};
use crate::key::{Key, StaticStr, StrBuf};

/// The eight kinds a [`Value`] can hold.
///
/// The declaration order is the cross-kind comparison order: any `Null`
/// sorts below any `Int`, and so on through `Object`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    /// No value.
    Null,
    /// Signed 64-bit integer.
    Int,
    /// Unsigned 64-bit integer.
    UInt,
    /// Double-precision float.
    Real,
    /// Byte string, usually UTF-8.
    String,
    /// Boolean.
    Bool,
    /// Sequence indexed by `u32`, possibly sparse.
    Array,
    /// Name-to-value map in sorted key order.
    Object,
}

/// Where a comment attaches relative to its value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommentPlacement {
    /// On the line(s) before the value.
    Before,
    /// On the same line, after the value.
    AfterOnSameLine,
    /// After the value, on following lines.
    After,
}

const COMMENT_SLOTS: usize = 3;

/// Comment slots, allocated lazily and shared between clones until one
/// side writes.
#[derive(Clone, Default)]
struct Comments(Option<Arc<[Option<String>; COMMENT_SLOTS]>>);

impl Comments {
    fn get(&self, placement: CommentPlacement) -> Option<&str> {
        self.0.as_ref()?[placement as usize].as_deref()
    }

    fn set(&mut self, placement: CommentPlacement, text: String) {
        let slots = self.0.get_or_insert_with(|| Arc::new([None, None, None]));
        Arc::make_mut(slots)[placement as usize] = Some(text);
    }
}

/// Sorted member container shared by arrays and objects.
///
/// Arrays hold index keys, objects hold name keys; iteration order is key
/// order either way.
pub(crate) type MemberMap = BTreeMap<Key, Value>;

#[derive(Clone)]
pub(crate) enum Repr {
    Null,
    Int(i64),
    UInt(u64),
    Real(f64),
    String(StrBuf),
    Bool(bool),
    Array(MemberMap),
    Object(MemberMap),
}

impl Repr {
    fn value_type(&self) -> ValueType {
        match self {
            Repr::Null => ValueType::Null,
            Repr::Int(_) => ValueType::Int,
            Repr::UInt(_) => ValueType::UInt,
            Repr::Real(_) => ValueType::Real,
            Repr::String(_) => ValueType::String,
            Repr::Bool(_) => ValueType::Bool,
            Repr::Array(_) => ValueType::Array,
            Repr::Object(_) => ValueType::Object,
        }
    }
}

/// A dynamically typed value in the JSON data model.
///
/// One of eight kinds ([`ValueType`]), plus two pieces of parser-facing
/// metadata that travel with the value regardless of kind: up to three
/// attached comments and a `[start, limit)` byte span into the source the
/// value was read from.
///
/// Checked access goes through `to_*` / `as_str` and returns
/// [`ValueError`]; the `Index` / `IndexMut` sugar panics on misuse like the
/// std collections do.
#[derive(Clone)]
pub struct Value {
    repr: Repr,
    comments: Comments,
    start: usize,
    limit: usize,
}

static NULL_VALUE: Value = Value::NULL;

fn f64_is_integral(value: f64) -> bool {
    value.fract() == 0.0
}

impl Value {
    /// The null value.
    pub const NULL: Value = Value {
        repr: Repr::Null,
        comments: Comments(None),
        start: 0,
        limit: 0,
    };

    /// A shared null with `'static` lifetime, returned by lookups that miss.
    #[must_use]
    pub fn null_ref() -> &'static Value {
        &NULL_VALUE
    }

    /// Creates the default value of the given kind: zero, false, empty.
    #[must_use]
    pub fn new(value_type: ValueType) -> Value {
        let repr = match value_type {
            ValueType::Null => Repr::Null,
            ValueType::Int => Repr::Int(0),
            ValueType::UInt => Repr::UInt(0),
            ValueType::Real => Repr::Real(0.0),
            ValueType::String => Repr::String(StrBuf::from_static("")),
            ValueType::Bool => Repr::Bool(false),
            ValueType::Array => Repr::Array(MemberMap::new()),
            ValueType::Object => Repr::Object(MemberMap::new()),
        };
        Value::from_repr(repr)
    }

    fn from_repr(repr: Repr) -> Value {
        Value {
            repr,
            comments: Comments(None),
            start: 0,
            limit: 0,
        }
    }

    /// Creates a string value from raw bytes, copied and truncated at
    /// [`MAX_STRING_LEN`](crate::MAX_STRING_LEN). Embedded zeros are kept.
    #[must_use]
    pub fn string_from_bytes(bytes: &[u8]) -> Value {
        Value::from_repr(Repr::String(StrBuf::owned(bytes)))
    }

    /// The kind currently held.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.repr.value_type()
    }

    // --- kind predicates ---

    /// Whether this is the null value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.repr, Repr::Null)
    }

    /// Whether this is a boolean.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self.repr, Repr::Bool(_))
    }

    /// Whether this is a string.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self.repr, Repr::String(_))
    }

    /// Whether this is an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.repr, Repr::Array(_))
    }

    /// Whether this is an object.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self.repr, Repr::Object(_))
    }

    /// Whether this holds any numeric kind (int, uint or real).
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self.repr, Repr::Int(_) | Repr::UInt(_) | Repr::Real(_))
    }

    /// Alias for [`is_numeric`](Self::is_numeric).
    #[must_use]
    pub fn is_double(&self) -> bool {
        self.is_numeric()
    }

    // --- range predicates ---
    //
    // The float bounds below rely on `i64::MAX as f64` being exactly 2^63
    // and `u64::MAX as f64` being exactly 2^64 (both maxima round up), so
    // the upper comparisons must be strict.

    /// Whether the current value converts losslessly to `i32`.
    #[must_use]
    pub fn is_i32(&self) -> bool {
        match self.repr {
            Repr::Int(i) => i >= i64::from(i32::MIN) && i <= i64::from(i32::MAX),
            Repr::UInt(u) => u <= i32::MAX as u64,
            Repr::Real(r) => {
                r >= f64::from(i32::MIN) && r <= f64::from(i32::MAX) && f64_is_integral(r)
            }
            _ => false,
        }
    }

    /// Whether the current value converts losslessly to `u32`.
    #[must_use]
    pub fn is_u32(&self) -> bool {
        match self.repr {
            Repr::Int(i) => i >= 0 && i <= i64::from(u32::MAX),
            Repr::UInt(u) => u <= u64::from(u32::MAX),
            Repr::Real(r) => r >= 0.0 && r <= f64::from(u32::MAX) && f64_is_integral(r),
            _ => false,
        }
    }

    /// Whether the current value converts losslessly to `i64`.
    #[must_use]
    pub fn is_i64(&self) -> bool {
        match self.repr {
            Repr::Int(_) => true,
            Repr::UInt(u) => u <= i64::MAX as u64,
            Repr::Real(r) => {
                r >= i64::MIN as f64 && r < i64::MAX as f64 && f64_is_integral(r)
            }
            _ => false,
        }
    }

    /// Whether the current value converts losslessly to `u64`.
    #[must_use]
    pub fn is_u64(&self) -> bool {
        match self.repr {
            Repr::Int(i) => i >= 0,
            Repr::UInt(_) => true,
            Repr::Real(r) => r >= 0.0 && r < u64::MAX as f64 && f64_is_integral(r),
            _ => false,
        }
    }

    /// Whether the current value is an integer, or a real holding one.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        match self.repr {
            Repr::Int(_) | Repr::UInt(_) => true,
            Repr::Real(r) => r >= 0.0 && r < u64::MAX as f64 && f64_is_integral(r),
            _ => false,
        }
    }

    // --- coercing accessors ---

    /// Reads the value as `i32`. Null is 0, booleans are 0/1, numeric kinds
    /// convert when in range (reals truncate toward zero).
    pub fn to_i32(&self) -> Result<i32, ValueError> {
        match self.repr {
            Repr::Int(i) => i32::try_from(i).map_err(|_| ValueError::out_of_range("i32")),
            Repr::UInt(u) => i32::try_from(u).map_err(|_| ValueError::out_of_range("i32")),
            Repr::Real(r) => {
                if r >= f64::from(i32::MIN) && r <= f64::from(i32::MAX) {
                    Ok(r as i32)
                } else {
                    Err(ValueError::out_of_range("i32"))
                }
            }
            Repr::Null => Ok(0),
            Repr::Bool(b) => Ok(i32::from(b)),
            _ => Err(ValueError::type_mismatch(ValueType::Int, self.value_type())),
        }
    }

    /// Reads the value as `u32`. Same coercions as [`to_i32`](Self::to_i32).
    pub fn to_u32(&self) -> Result<u32, ValueError> {
        match self.repr {
            Repr::Int(i) => u32::try_from(i).map_err(|_| ValueError::out_of_range("u32")),
            Repr::UInt(u) => u32::try_from(u).map_err(|_| ValueError::out_of_range("u32")),
            Repr::Real(r) => {
                if r >= 0.0 && r <= f64::from(u32::MAX) {
                    Ok(r as u32)
                } else {
                    Err(ValueError::out_of_range("u32"))
                }
            }
            Repr::Null => Ok(0),
            Repr::Bool(b) => Ok(u32::from(b)),
            _ => Err(ValueError::type_mismatch(ValueType::UInt, self.value_type())),
        }
    }

    /// Reads the value as `i64`. Same coercions as [`to_i32`](Self::to_i32).
    pub fn to_i64(&self) -> Result<i64, ValueError> {
        match self.repr {
            Repr::Int(i) => Ok(i),
            Repr::UInt(u) => i64::try_from(u).map_err(|_| ValueError::out_of_range("i64")),
            Repr::Real(r) => {
                if r >= i64::MIN as f64 && r < i64::MAX as f64 {
                    Ok(r as i64)
                } else {
                    Err(ValueError::out_of_range("i64"))
                }
            }
            Repr::Null => Ok(0),
            Repr::Bool(b) => Ok(i64::from(b)),
            _ => Err(ValueError::type_mismatch(ValueType::Int, self.value_type())),
        }
    }

    /// Reads the value as `u64`. Same coercions as [`to_i32`](Self::to_i32).
    pub fn to_u64(&self) -> Result<u64, ValueError> {
        match self.repr {
            Repr::Int(i) => u64::try_from(i).map_err(|_| ValueError::out_of_range("u64")),
            Repr::UInt(u) => Ok(u),
            Repr::Real(r) => {
                if r >= 0.0 && r < u64::MAX as f64 {
                    Ok(r as u64)
                } else {
                    Err(ValueError::out_of_range("u64"))
                }
            }
            Repr::Null => Ok(0),
            Repr::Bool(b) => Ok(u64::from(b)),
            _ => Err(ValueError::type_mismatch(ValueType::UInt, self.value_type())),
        }
    }

    /// Reads the value as `f64`. Null is 0.0, booleans are 0.0/1.0,
    /// integers widen (possibly rounding beyond 2^53).
    pub fn to_f64(&self) -> Result<f64, ValueError> {
        match self.repr {
            Repr::Int(i) => Ok(i as f64),
            Repr::UInt(u) => Ok(u as f64),
            Repr::Real(r) => Ok(r),
            Repr::Null => Ok(0.0),
            Repr::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
            _ => Err(ValueError::type_mismatch(ValueType::Real, self.value_type())),
        }
    }

    /// Reads the value as `f32`, narrowing through `f64`.
    pub fn to_f32(&self) -> Result<f32, ValueError> {
        Ok(self.to_f64()? as f32)
    }

    /// Reads the value as `bool`. Null is false, numbers are true when
    /// nonzero; a NaN real is false.
    pub fn to_bool(&self) -> Result<bool, ValueError> {
        match self.repr {
            Repr::Int(i) => Ok(i != 0),
            Repr::UInt(u) => Ok(u != 0),
            Repr::Real(r) => Ok(!r.is_nan() && r != 0.0),
            Repr::Null => Ok(false),
            Repr::Bool(b) => Ok(b),
            _ => Err(ValueError::type_mismatch(ValueType::Bool, self.value_type())),
        }
    }

    /// Renders the value as owned text: null is `""`, numbers and booleans
    /// format per the [`format`](crate::format) module, strings pass
    /// through (failing on non-UTF-8 bytes). Containers do not convert.
    pub fn to_text(&self) -> Result<String, ValueError> {
        match &self.repr {
            Repr::Null => Ok(String::new()),
            Repr::Int(i) => Ok(integer_to_string(*i)),
            Repr::UInt(u) => Ok(unsigned_to_string(*u)),
            Repr::Real(r) => Ok(real_to_string(*r)),
            Repr::String(s) => core::str::from_utf8(s.as_bytes())
                .map(str::to_owned)
                .map_err(|_| ValueError::invalid_utf8()),
            Repr::Bool(b) => Ok(bool_to_string(*b).to_string()),
            _ => Err(ValueError::type_mismatch(
                ValueType::String,
                self.value_type(),
            )),
        }
    }

    /// Borrows a string value as `&str`. No coercion: every other kind is a
    /// type mismatch, and non-UTF-8 bytes fail.
    pub fn as_str(&self) -> Result<&str, ValueError> {
        let bytes = self.str_bytes()?;
        core::str::from_utf8(bytes).map_err(|_| ValueError::invalid_utf8())
    }

    /// Borrows a string value's raw bytes, embedded zeros included.
    pub fn str_bytes(&self) -> Result<&[u8], ValueError> {
        match &self.repr {
            Repr::String(s) => Ok(s.as_bytes()),
            _ => Err(ValueError::type_mismatch(
                ValueType::String,
                self.value_type(),
            )),
        }
    }

    /// Whether the matching accessor would succeed for `target`.
    ///
    /// More permissive than the lossless `is_*` predicates: a real with a
    /// fractional part is convertible to `Int` when in range (it
    /// truncates), and any value equal to zero/false/empty is convertible
    /// to `Null`.
    #[must_use]
    pub fn is_convertible_to(&self, target: ValueType) -> bool {
        match target {
            ValueType::Null => match &self.repr {
                Repr::Null => true,
                Repr::Int(i) => *i == 0,
                Repr::UInt(u) => *u == 0,
                Repr::Real(r) => *r == 0.0,
                Repr::String(s) => s.is_empty(),
                Repr::Bool(b) => !b,
                Repr::Array(m) | Repr::Object(m) => m.is_empty(),
            },
            ValueType::Int => {
                self.is_i32()
                    || matches!(self.repr,
                        Repr::Real(r) if r >= f64::from(i32::MIN) && r <= f64::from(i32::MAX))
                    || matches!(self.repr, Repr::Bool(_) | Repr::Null)
            }
            ValueType::UInt => {
                self.is_u32()
                    || matches!(self.repr,
                        Repr::Real(r) if r >= 0.0 && r <= f64::from(u32::MAX))
                    || matches!(self.repr, Repr::Bool(_) | Repr::Null)
            }
            ValueType::Real | ValueType::Bool => {
                self.is_numeric() || matches!(self.repr, Repr::Bool(_) | Repr::Null)
            }
            ValueType::String => {
                self.is_numeric()
                    || matches!(self.repr, Repr::Bool(_) | Repr::String(_) | Repr::Null)
            }
            ValueType::Array => matches!(self.repr, Repr::Array(_) | Repr::Null),
            ValueType::Object => matches!(self.repr, Repr::Object(_) | Repr::Null),
        }
    }

    // --- container operations ---

    pub(crate) fn member_map(&self) -> Option<&MemberMap> {
        match &self.repr {
            Repr::Array(m) | Repr::Object(m) => Some(m),
            _ => None,
        }
    }

    fn member_map_mut(&mut self) -> Option<&mut MemberMap> {
        match &mut self.repr {
            Repr::Array(m) | Repr::Object(m) => Some(m),
            _ => None,
        }
    }

    fn array_len(members: &MemberMap) -> u32 {
        members
            .keys()
            .next_back()
            .and_then(Key::as_index)
            .map_or(0, |last| last + 1)
    }

    /// Null converts to an empty array in place; anything else but an
    /// array is a usage error.
    fn array_members_mut(&mut self, op: &str) -> &mut MemberMap {
        if self.is_null() {
            self.repr = Repr::Array(MemberMap::new());
        }
        let kind = self.value_type();
        match &mut self.repr {
            Repr::Array(m) => m,
            _ => panic!("`{op}` requires an array value, got {kind:?}"),
        }
    }

    fn object_members_mut(&mut self, op: &str) -> &mut MemberMap {
        if self.is_null() {
            self.repr = Repr::Object(MemberMap::new());
        }
        let kind = self.value_type();
        match &mut self.repr {
            Repr::Object(m) => m,
            _ => panic!("`{op}` requires an object value, got {kind:?}"),
        }
    }

    /// Number of members. An array's size is its highest index plus one,
    /// so sparse arrays count their gaps; scalars report 0.
    #[must_use]
    pub fn size(&self) -> u32 {
        match &self.repr {
            Repr::Array(m) => Self::array_len(m),
            Repr::Object(m) => m.len() as u32,
            _ => 0,
        }
    }

    /// Whether a null, array or object value has no members. Scalars are
    /// never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self.repr {
            Repr::Null | Repr::Array(_) | Repr::Object(_) => self.size() == 0,
            _ => false,
        }
    }

    /// Removes every member.
    ///
    /// # Panics
    ///
    /// If the value is not null, an array or an object.
    pub fn clear(&mut self) {
        let kind = self.value_type();
        match &mut self.repr {
            Repr::Null => {}
            Repr::Array(m) | Repr::Object(m) => m.clear(),
            _ => panic!("`clear` requires an array or object value, got {kind:?}"),
        }
    }

    /// Resizes an array (or null, which becomes an array).
    ///
    /// Growing only materializes the final slot, leaving the rest sparse;
    /// shrinking drops every member at index `new_size` or above.
    ///
    /// # Panics
    ///
    /// If the value is neither null nor an array.
    pub fn resize(&mut self, new_size: u32) {
        let members = self.array_members_mut("resize");
        let old_size = Self::array_len(members);
        if new_size == old_size {
            return;
        }
        if new_size == 0 {
            members.clear();
        } else if new_size > old_size {
            members.entry(Key::index(new_size - 1)).or_insert(Value::NULL);
        } else {
            let _ = members.split_off(&Key::index(new_size));
        }
    }

    /// Whether `index` is below the array's size.
    #[must_use]
    pub fn is_valid_index(&self, index: u32) -> bool {
        index < self.size()
    }

    /// Looks up an array slot. `None` for misses, gaps in a sparse array
    /// included, and for non-arrays.
    #[must_use]
    pub fn get_index(&self, index: u32) -> Option<&Value> {
        match &self.repr {
            Repr::Array(m) => m.get(&Key::index(index)),
            _ => None,
        }
    }

    /// Like [`get_index`](Self::get_index) with a fallback.
    #[must_use]
    pub fn get_index_or<'a>(&'a self, index: u32, default: &'a Value) -> &'a Value {
        self.get_index(index).unwrap_or(default)
    }

    /// Looks up an object member. `None` for misses and for non-objects.
    #[must_use]
    pub fn get_member(&self, key: &str) -> Option<&Value> {
        match &self.repr {
            Repr::Object(m) => m.get(&Key::name(key)),
            _ => None,
        }
    }

    /// Like [`get_member`](Self::get_member) with a fallback.
    #[must_use]
    pub fn get_member_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get_member(key).unwrap_or(default)
    }

    /// Whether an object member with this name exists.
    #[must_use]
    pub fn is_member(&self, key: &str) -> bool {
        self.get_member(key).is_some()
    }

    /// The sorted member names of an object. Empty for every other kind.
    #[must_use]
    pub fn member_names(&self) -> Vec<String> {
        match &self.repr {
            Repr::Object(m) => m
                .keys()
                .filter_map(Key::as_name)
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The member at the lowest key, if any.
    #[must_use]
    pub fn front(&self) -> Option<&Value> {
        self.member_map()?.values().next()
    }

    /// The member at the highest key, if any.
    #[must_use]
    pub fn back(&self) -> Option<&Value> {
        self.member_map()?.values().next_back()
    }

    /// Looks up or creates the member named `key`, creating a null slot on
    /// a miss. Null converts to an empty object first.
    ///
    /// # Panics
    ///
    /// If the value is neither null nor an object.
    pub fn member_mut(&mut self, key: &str) -> &mut Value {
        self.object_members_mut("member access")
            .entry(Key::name(key))
            .or_insert(Value::NULL)
    }

    /// [`member_mut`](Self::member_mut) keyed by static text: on insert the
    /// key borrows the `&'static str` instead of copying it.
    pub fn member_mut_static(&mut self, key: StaticStr) -> &mut Value {
        self.object_members_mut("member access")
            .entry(Key::static_name(key))
            .or_insert(Value::NULL)
    }

    /// Appends to an array (or null, which becomes an array) at index
    /// `size()`, returning the new slot.
    ///
    /// # Panics
    ///
    /// If the value is neither null nor an array.
    pub fn append(&mut self, value: Value) -> &mut Value {
        let members = self.array_members_mut("append");
        let index = Self::array_len(members);
        members.entry(Key::index(index)).or_insert(value)
    }

    /// Inserts at `index`, shifting members at `index` and above up by one.
    /// Returns false when `index` exceeds the current size.
    ///
    /// # Panics
    ///
    /// If the value is neither null nor an array.
    pub fn insert(&mut self, index: u32, value: Value) -> bool {
        let members = self.array_members_mut("insert");
        let length = Self::array_len(members);
        if index > length {
            return false;
        }
        let tail: Vec<u32> = members
            .range(Key::index(index)..)
            .filter_map(|(k, _)| k.as_index())
            .collect();
        for &i in tail.iter().rev() {
            if let Some(moved) = members.remove(&Key::index(i)) {
                members.insert(Key::index(i + 1), moved);
            }
        }
        members.insert(Key::index(index), value);
        true
    }

    /// Removes and returns the object member named `key`.
    pub fn remove_member(&mut self, key: &str) -> Option<Value> {
        match &mut self.repr {
            Repr::Object(m) => m.remove(&Key::name(key)),
            _ => None,
        }
    }

    /// Removes and returns the array member at `index`, shifting higher
    /// members down by one. Gaps stay gaps.
    pub fn remove_index(&mut self, index: u32) -> Option<Value> {
        let members = match &mut self.repr {
            Repr::Array(m) => m,
            _ => return None,
        };
        let removed = members.remove(&Key::index(index))?;
        let tail: Vec<u32> = members
            .range(Key::index(index)..)
            .filter_map(|(k, _)| k.as_index())
            .collect();
        for i in tail {
            if let Some(moved) = members.remove(&Key::index(i)) {
                members.insert(Key::index(i - 1), moved);
            }
        }
        Some(removed)
    }

    /// Iterates members in key order. Empty for scalars.
    #[must_use]
    pub fn members(&self) -> Members<'_> {
        Members::new(self.member_map())
    }

    /// Iterates members mutably in key order. Empty for scalars.
    #[must_use]
    pub fn members_mut(&mut self) -> MembersMut<'_> {
        MembersMut::new(self.member_map_mut())
    }

    // --- comparison ---

    /// Three-way payload comparison: kind order first
    /// (see [`ValueType`]), then within a kind by payload. Containers
    /// compare by size, then lexicographically by `(key, value)` entries.
    ///
    /// NaN reals compare equal to everything of real kind here; the `==`
    /// operator is the one that treats NaN as unequal.
    #[must_use]
    pub fn compare(&self, other: &Value) -> Ordering {
        if self.payload_lt(other) {
            Ordering::Less
        } else if other.payload_lt(self) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn payload_lt(&self, other: &Value) -> bool {
        let (lhs, rhs) = (self.value_type(), other.value_type());
        if lhs != rhs {
            return lhs < rhs;
        }
        match (&self.repr, &other.repr) {
            (Repr::Null, Repr::Null) => false,
            (Repr::Int(a), Repr::Int(b)) => a < b,
            (Repr::UInt(a), Repr::UInt(b)) => a < b,
            (Repr::Real(a), Repr::Real(b)) => a < b,
            (Repr::Bool(a), Repr::Bool(b)) => a < b,
            (Repr::String(a), Repr::String(b)) => a.as_bytes() < b.as_bytes(),
            (Repr::Array(a), Repr::Array(b)) | (Repr::Object(a), Repr::Object(b)) => {
                if a.len() != b.len() {
                    a.len() < b.len()
                } else {
                    Self::members_lt(a, b)
                }
            }
            _ => unreachable!("kinds already matched"),
        }
    }

    fn members_lt(a: &MemberMap, b: &MemberMap) -> bool {
        for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
            match ka.cmp(kb) {
                Ordering::Less => return true,
                Ordering::Greater => return false,
                Ordering::Equal => {}
            }
            if va.payload_lt(vb) {
                return true;
            }
            if vb.payload_lt(va) {
                return false;
            }
        }
        a.len() < b.len()
    }

    /// The equality operator this type shipped with for years: comparing
    /// two values of the same scalar kind answers `a < b`, not `a == b`
    /// (so `legacy_eq(&1.into(), &2.into())` is true). Containers of equal
    /// size compare by lexicographic less-than as well.
    ///
    /// Kept for byte-for-byte compatibility audits; everything else should
    /// use `==`, which is genuine equality.
    #[must_use]
    pub fn legacy_eq(&self, other: &Value) -> bool {
        if self.value_type() != other.value_type() {
            return false;
        }
        match (&self.repr, &other.repr) {
            (Repr::Null, Repr::Null) => true,
            (Repr::Int(a), Repr::Int(b)) => a < b,
            (Repr::UInt(a), Repr::UInt(b)) => a < b,
            (Repr::Real(a), Repr::Real(b)) => a < b,
            (Repr::Bool(a), Repr::Bool(b)) => a < b,
            (Repr::String(a), Repr::String(b)) => a.as_bytes() < b.as_bytes(),
            (Repr::Array(a), Repr::Array(b)) | (Repr::Object(a), Repr::Object(b)) => {
                if a.len() != b.len() {
                    a.len() < b.len()
                } else {
                    Self::members_lt(a, b)
                }
            }
            _ => unreachable!("kinds already matched"),
        }
    }

    // --- whole-value operations ---

    /// Swaps payloads, comments and source offsets.
    pub fn swap(&mut self, other: &mut Value) {
        core::mem::swap(self, other);
    }

    /// Swaps payloads only; each side keeps its own comments and offsets.
    pub fn swap_payload(&mut self, other: &mut Value) {
        core::mem::swap(&mut self.repr, &mut other.repr);
    }

    /// Copies `other`'s payload over this one; comments and offsets here
    /// are untouched.
    pub fn copy_payload_from(&mut self, other: &Value) {
        self.repr = other.repr.clone();
    }

    /// Moves the value out, leaving null behind.
    #[must_use]
    pub fn take(&mut self) -> Value {
        core::mem::replace(self, Value::NULL)
    }

    // --- comments and source offsets ---

    /// Attaches a comment at the given placement, replacing any previous
    /// one there. Slots are allocated on first write.
    pub fn set_comment(&mut self, text: impl Into<String>, placement: CommentPlacement) {
        self.comments.set(placement, text.into());
    }

    /// The comment at the given placement, if set.
    #[must_use]
    pub fn comment(&self, placement: CommentPlacement) -> Option<&str> {
        self.comments.get(placement)
    }

    /// Whether a comment is set at the given placement.
    #[must_use]
    pub fn has_comment(&self, placement: CommentPlacement) -> bool {
        self.comment(placement).is_some()
    }

    /// Records the byte offset where this value started in its source.
    pub fn set_offset_start(&mut self, start: usize) {
        self.start = start;
    }

    /// Records the byte offset just past this value in its source.
    pub fn set_offset_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// Byte offset where this value started in its source, 0 if unset.
    #[must_use]
    pub fn offset_start(&self) -> usize {
        self.start
    }

    /// Byte offset just past this value in its source, 0 if unset.
    #[must_use]
    pub fn offset_limit(&self) -> usize {
        self.limit
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::NULL
    }
}

/// Genuine structural equality over payloads; comments and offsets are
/// metadata and do not participate. `Int(1)` and `UInt(1)` are different
/// kinds and therefore unequal, and NaN is unequal to itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Null, Repr::Null) => true,
            (Repr::Int(a), Repr::Int(b)) => a == b,
            (Repr::UInt(a), Repr::UInt(b)) => a == b,
            (Repr::Real(a), Repr::Real(b)) => a == b,
            (Repr::Bool(a), Repr::Bool(b)) => a == b,
            (Repr::String(a), Repr::String(b)) => a.as_bytes() == b.as_bytes(),
            (Repr::Array(a), Repr::Array(b)) | (Repr::Object(a), Repr::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
            }
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let ordering = self.compare(other);
        // compare() treats NaN as equal-to-anything-real; == does not.
        // Report those pairs as unordered to keep the two consistent.
        if ordering == Ordering::Equal && self != other {
            None
        } else {
            Some(ordering)
        }
    }
}

impl ops::Index<u32> for Value {
    type Output = Value;

    /// Array slot access; missing slots (and gaps) read as null.
    ///
    /// # Panics
    ///
    /// If the value is neither null nor an array.
    fn index(&self, index: u32) -> &Value {
        match &self.repr {
            Repr::Null => Value::null_ref(),
            Repr::Array(m) => m.get(&Key::index(index)).unwrap_or(Value::null_ref()),
            _ => panic!("indexing requires an array value, got {:?}", self.value_type()),
        }
    }
}

impl ops::IndexMut<u32> for Value {
    /// Array slot access, creating a null slot on a miss. Null converts to
    /// an empty array first.
    ///
    /// # Panics
    ///
    /// If the value is neither null nor an array.
    fn index_mut(&mut self, index: u32) -> &mut Value {
        self.array_members_mut("indexing")
            .entry(Key::index(index))
            .or_insert(Value::NULL)
    }
}

impl ops::Index<&str> for Value {
    type Output = Value;

    /// Object member access; missing members read as null.
    ///
    /// # Panics
    ///
    /// If the value is neither null nor an object.
    fn index(&self, key: &str) -> &Value {
        match &self.repr {
            Repr::Null => Value::null_ref(),
            Repr::Object(m) => m.get(&Key::name(key)).unwrap_or(Value::null_ref()),
            _ => panic!("member access requires an object value, got {:?}", self.value_type()),
        }
    }
}

impl ops::IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.member_mut(key)
    }
}

impl ops::Index<StaticStr> for Value {
    type Output = Value;

    fn index(&self, key: StaticStr) -> &Value {
        &self[key.as_str()]
    }
}

impl ops::IndexMut<StaticStr> for Value {
    fn index_mut(&mut self, key: StaticStr) -> &mut Value {
        self.member_mut_static(key)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::from_repr(Repr::Bool(value))
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::from_repr(Repr::Int(i64::from(value)))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::from_repr(Repr::Int(i64::from(value)))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::from_repr(Repr::Int(i64::from(value)))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::from_repr(Repr::Int(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::from_repr(Repr::UInt(u64::from(value)))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::from_repr(Repr::UInt(u64::from(value)))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::from_repr(Repr::UInt(u64::from(value)))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::from_repr(Repr::UInt(value))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::from_repr(Repr::Real(f64::from(value)))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::from_repr(Repr::Real(value))
    }
}

impl From<&str> for Value {
    /// Copies the text into owned storage.
    fn from(value: &str) -> Self {
        Value::string_from_bytes(value.as_bytes())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::string_from_bytes(value.as_bytes())
    }
}

impl From<StaticStr> for Value {
    /// Borrows the static text instead of copying it.
    fn from(value: StaticStr) -> Self {
        Value::from_repr(Repr::String(StrBuf::from_static(value.as_str())))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Null => f.write_str("null"),
            Repr::Int(i) => fmt::Debug::fmt(i, f),
            Repr::UInt(u) => fmt::Debug::fmt(u, f),
            Repr::Real(r) => fmt::Debug::fmt(r, f),
            Repr::String(s) => fmt::Debug::fmt(s, f),
            Repr::Bool(b) => fmt::Debug::fmt(b, f),
            Repr::Array(m) => f.debug_list().entries(m.values()).finish(),
            Repr::Object(m) => f.debug_map().entries(m.iter()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_kind() {
        assert!(Value::new(ValueType::Null).is_null());
        assert_eq!(Value::new(ValueType::Int).to_i64(), Ok(0));
        assert_eq!(Value::new(ValueType::UInt).to_u64(), Ok(0));
        assert_eq!(Value::new(ValueType::Real).to_f64(), Ok(0.0));
        assert_eq!(Value::new(ValueType::String).as_str(), Ok(""));
        assert_eq!(Value::new(ValueType::Bool).to_bool(), Ok(false));
        assert_eq!(Value::new(ValueType::Array).size(), 0);
        assert_eq!(Value::new(ValueType::Object).size(), 0);
    }

    #[test]
    fn null_coerces_to_zero_everything() {
        let null = Value::NULL;
        assert_eq!(null.to_i32(), Ok(0));
        assert_eq!(null.to_u64(), Ok(0));
        assert_eq!(null.to_f64(), Ok(0.0));
        assert_eq!(null.to_bool(), Ok(false));
        assert_eq!(null.to_text(), Ok(String::new()));
        assert!(null.as_str().is_err());
    }

    #[test]
    fn bool_coerces_to_one_and_zero() {
        let t = Value::from(true);
        assert_eq!(t.to_i32(), Ok(1));
        assert_eq!(t.to_u64(), Ok(1));
        assert_eq!(t.to_f64(), Ok(1.0));
        assert_eq!(t.to_text(), Ok("true".to_string()));
    }

    #[test]
    fn real_truncates_toward_zero() {
        assert_eq!(Value::from(2.9).to_i32(), Ok(2));
        assert_eq!(Value::from(-2.9).to_i32(), Ok(-2));
    }

    #[test]
    fn out_of_range_is_an_error_not_a_wrap() {
        assert!(Value::from(i64::from(i32::MAX) + 1).to_i32().is_err());
        assert!(Value::from(-1i64).to_u64().is_err());
        assert!(Value::from(1e300).to_i64().is_err());
        assert!(Value::from(u64::MAX).to_i64().is_err());
    }

    #[test]
    fn strict_upper_bounds_on_real_predicates() {
        // 2^63 and 2^64 are exactly representable and just out of range.
        assert!(!Value::from(9_223_372_036_854_775_808.0f64).is_i64());
        assert!(!Value::from(18_446_744_073_709_551_616.0f64).is_u64());
        assert!(Value::from(9_223_372_036_854_775_808.0f64).is_u64());
        assert!(Value::from(i64::MIN as f64).is_i64());
    }

    #[test]
    fn integral_predicate_ignores_negative_reals() {
        assert!(Value::from(3.0).is_integral());
        assert!(!Value::from(3.5).is_integral());
        assert!(!Value::from(-3.0).is_integral());
        assert!(Value::from(-7i64).is_integral());
    }

    #[test]
    fn nan_is_falsy() {
        assert_eq!(Value::from(f64::NAN).to_bool(), Ok(false));
        assert_eq!(Value::from(0.0).to_bool(), Ok(false));
        assert_eq!(Value::from(-0.5).to_bool(), Ok(true));
    }

    #[test]
    fn convertible_to_null_means_zero_false_or_empty() {
        assert!(Value::from(0i64).is_convertible_to(ValueType::Null));
        assert!(!Value::from(1i64).is_convertible_to(ValueType::Null));
        assert!(Value::from("").is_convertible_to(ValueType::Null));
        assert!(Value::new(ValueType::Array).is_convertible_to(ValueType::Null));
        assert!(!Value::from(true).is_convertible_to(ValueType::Null));
    }

    #[test]
    fn fractional_real_is_convertible_to_int_when_in_range() {
        assert!(Value::from(2.5).is_convertible_to(ValueType::Int));
        assert!(!Value::from(2.5).is_i32());
        assert!(!Value::from(1e300).is_convertible_to(ValueType::Int));
    }

    #[test]
    fn index_misses_read_as_null() {
        let mut arr = Value::NULL;
        arr[0u32] = Value::from(1i64);
        assert!(arr[5u32].is_null());
        assert_eq!(arr.size(), 1);

        let obj = Value::new(ValueType::Object);
        assert!(obj["absent"].is_null());
    }

    #[test]
    #[should_panic(expected = "requires an array")]
    fn indexing_a_scalar_panics() {
        let v = Value::from(3i64);
        let _ = &v[0u32];
    }

    #[test]
    fn take_leaves_null_behind() {
        let mut v = Value::from("payload");
        let taken = v.take();
        assert!(v.is_null());
        assert_eq!(taken.as_str(), Ok("payload"));
    }

    #[test]
    fn swap_payload_keeps_metadata_in_place() {
        let mut a = Value::from(1i64);
        a.set_comment("// a", CommentPlacement::Before);
        a.set_offset_start(10);
        let mut b = Value::from("two");
        b.set_offset_start(99);

        a.swap_payload(&mut b);
        assert_eq!(a.as_str(), Ok("two"));
        assert_eq!(a.comment(CommentPlacement::Before), Some("// a"));
        assert_eq!(a.offset_start(), 10);
        assert_eq!(b.to_i64(), Ok(1));
        assert_eq!(b.offset_start(), 99);
        assert!(!b.has_comment(CommentPlacement::Before));
    }

    #[test]
    fn full_swap_moves_metadata_too() {
        let mut a = Value::from(1i64);
        a.set_comment("// a", CommentPlacement::Before);
        let mut b = Value::NULL;
        a.swap(&mut b);
        assert!(a.is_null());
        assert_eq!(b.comment(CommentPlacement::Before), Some("// a"));
    }

    #[test]
    fn comment_slots_are_independent() {
        let mut v = Value::from(1i64);
        v.set_comment("// before", CommentPlacement::Before);
        v.set_comment("// trailing", CommentPlacement::AfterOnSameLine);
        assert_eq!(v.comment(CommentPlacement::Before), Some("// before"));
        assert_eq!(v.comment(CommentPlacement::AfterOnSameLine), Some("// trailing"));
        assert!(!v.has_comment(CommentPlacement::After));
    }

    #[test]
    fn clones_share_comment_storage_until_written() {
        let mut original = Value::from(1i64);
        original.set_comment("// shared", CommentPlacement::Before);
        let mut copy = original.clone();
        copy.set_comment("// own", CommentPlacement::Before);
        assert_eq!(original.comment(CommentPlacement::Before), Some("// shared"));
        assert_eq!(copy.comment(CommentPlacement::Before), Some("// own"));
    }

    #[test]
    fn kind_order_dominates_comparison() {
        let null = Value::NULL;
        let int = Value::from(-100i64);
        let uint = Value::from(5u64);
        let string = Value::from("a");
        let boolean = Value::from(false);
        assert_eq!(null.compare(&int), Ordering::Less);
        assert_eq!(int.compare(&uint), Ordering::Less);
        assert_eq!(string.compare(&boolean), Ordering::Less);
    }

    #[test]
    fn legacy_eq_is_the_less_than_quirk() {
        let one = Value::from(1i64);
        let two = Value::from(2i64);
        // the long-standing behavior: same-kind scalars answer `<`
        assert!(one.legacy_eq(&two));
        assert!(!one.legacy_eq(&one));
        assert!(!two.legacy_eq(&one));
        // corrected equality disagrees on exactly those answers
        assert!(one == one);
        assert!(one != two);
        // null and kind mismatch agree between the two
        assert!(Value::NULL.legacy_eq(&Value::NULL));
        assert!(!one.legacy_eq(&Value::from(1u64)));
    }

    #[test]
    fn nan_is_unequal_but_unordered() {
        let nan = Value::from(f64::NAN);
        assert!(nan != nan);
        assert_eq!(nan.compare(&nan), Ordering::Equal);
        assert_eq!(nan.partial_cmp(&nan), None);
    }

    #[test]
    fn container_comparison_by_size_then_entries() {
        let mut small = Value::NULL;
        small.append(Value::from(9i64));
        let mut big = Value::NULL;
        big.append(Value::from(0i64));
        big.append(Value::from(0i64));
        assert_eq!(small.compare(&big), Ordering::Less);

        let mut a = Value::NULL;
        a.append(Value::from(1i64));
        let mut b = Value::NULL;
        b.append(Value::from(2i64));
        assert_eq!(a.compare(&b), Ordering::Less);
        assert!(a == a.clone());
    }

    #[test]
    fn int_and_uint_one_are_distinct() {
        assert!(Value::from(1i64) != Value::from(1u64));
    }

    #[test]
    fn string_values_with_same_bytes_are_equal() {
        let owned = Value::from("pi");
        let borrowed = Value::from(StaticStr("pi"));
        assert!(owned == borrowed);
    }
}
