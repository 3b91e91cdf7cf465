//! Status enums for various entities.
//!
//! The backend stores statuses as free-form lowercase strings. Each enum here
//! knows the values the client acts on and keeps anything else verbatim in an
//! `Other` variant, so an unexpected status never fails deserialization.

use serde::{Deserialize, Serialize};

/// Define a string-backed status enum with a catch-all `Other` variant.
macro_rules! define_status {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A status value this client does not know about.
            Other(String),
        }

        impl $name {
            /// The wire representation of this status.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(value) => value,
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $wire => Self::$variant, )+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(status: $name) -> Self {
                match status {
                    $name::Other(value) => value,
                    known => known.as_str().to_owned(),
                }
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }
    };
}

define_status! {
    /// Order lifecycle status.
    #[derive(Default)]
    OrderStatus {
        /// Being prepared or shipped.
        #[default]
        InProgress => "inprogress",
        /// Delivered to the customer.
        Delivered => "delivered",
        /// Returned by the customer.
        Return => "return",
        /// Locked by an administrator.
        Locked => "locked",
    }
}

define_status! {
    /// Product status as stored by the backend.
    ///
    /// Storefront documents use `active`/`locked`; the back office stores the
    /// stock classification directly.
    ProductStatus {
        Active => "active",
        Locked => "locked",
        InStock => "instock",
        LowStock => "lowstock",
        OutOfStock => "outofstock",
    }
}

define_status! {
    /// Customer account status.
    #[derive(Default)]
    UserStatus {
        #[default]
        Active => "active",
        Locked => "locked",
        Pending => "pending",
    }
}

define_status! {
    /// Category visibility status.
    #[derive(Default)]
    CategoryStatus {
        #[default]
        Active => "active",
        Inactive => "inactive",
    }
}

/// Stock classification derived from quantity and minimum stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    #[default]
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// The wire representation, matching [`ProductStatus`] values.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "instock",
            Self::LowStock => "lowstock",
            Self::OutOfStock => "outofstock",
        }
    }
}
