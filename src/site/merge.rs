//! Typed merge of partial records over a complete fallback.
//!
//! Every schema type implements [`Merge`]. Leaves (strings, numbers, bools,
//! arrays) take the partial value when present, otherwise the fallback's.
//! Records recurse field by field. Arrays are never merged element-wise.
//!
//! "Present" means the JSON value was neither missing nor `null`; falsy
//! values like `0`, `false` and `""` are present and win over the fallback.

/// A type that can be rebuilt from an optional partial value and a complete
/// fallback of the same shape.
pub trait Merge: Clone {
    /// Shape with every nested field optional.
    type Partial;

    /// Combine `partial` with `fallback`; the result is always complete.
    fn merge(partial: Option<Self::Partial>, fallback: &Self) -> Self;

    /// Lift a complete value into a fully populated partial.
    fn into_partial(self) -> Self::Partial;
}

macro_rules! impl_leaf {
    ($($ty:ty),* $(,)?) => {$(
        impl Merge for $ty {
            type Partial = $ty;

            #[inline]
            fn merge(partial: Option<Self>, fallback: &Self) -> Self {
                partial.unwrap_or_else(|| fallback.clone())
            }

            #[inline]
            fn into_partial(self) -> Self {
                self
            }
        }
    )*};
}

impl_leaf!(String, bool, u32, u64);

impl<T: Clone> Merge for Vec<T> {
    type Partial = Vec<T>;

    #[inline]
    fn merge(partial: Option<Self>, fallback: &Self) -> Self {
        partial.unwrap_or_else(|| fallback.clone())
    }

    #[inline]
    fn into_partial(self) -> Self {
        self
    }
}

/// Declare a schema record together with its partial twin.
///
/// ```ignore
/// merge_record! {
///     /// Owner card.
///     pub struct Owner / PartialOwner {
///         pub name: String,
///         pub links: Vec<SocialLink>,
///     }
/// }
/// ```
macro_rules! merge_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident / $partial:ident {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        #[doc = concat!("[`", stringify!($name), "`] with every field optional.")]
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $partial {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<<$ty as $crate::site::Merge>::Partial>,
            )*
        }

        impl $crate::site::Merge for $name {
            type Partial = $partial;

            fn merge(partial: Option<$partial>, fallback: &Self) -> Self {
                let Some(partial) = partial else {
                    return fallback.clone();
                };
                Self {
                    $(
                        $field: $crate::site::Merge::merge(partial.$field, &fallback.$field),
                    )*
                }
            }

            fn into_partial(self) -> $partial {
                $partial {
                    $(
                        $field: Some($crate::site::Merge::into_partial(self.$field)),
                    )*
                }
            }
        }

        impl From<$name> for $partial {
            fn from(value: $name) -> Self {
                $crate::site::Merge::into_partial(value)
            }
        }
    };
}

pub(crate) use merge_record;
