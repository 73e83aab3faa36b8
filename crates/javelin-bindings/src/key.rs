//! Binding identity keys.
//!
//! Keys are derived from declaration structure, not from table slots, so the
//! same declaration resolved twice yields the same key. The encoding follows
//! the JVM descriptor shape:
//!
//! - packages: `java/lang`
//! - classes: `Ljava/lang/Object;`, member types `Lp/Outer$Inner;`
//! - arrays: `[I`, `[[Ljava/lang/String;`
//! - methods: `Lp/T;.m(ILjava/lang/String;)V`, constructors `Lp/T;.<init>()`
//! - fields: `Lp/T;.f)`
//! - parameters and locals: `<method key>#name#ordinal`
//! - type variables: `<owner key>:TE;`
//! - parameterized instances: `Lp/List<Ljava/lang/String;>;`, raw `Lp/List<>;`

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BindingKey(String);

impl BindingKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn package(qualified: &str) -> Self {
        Self(qualified.replace('.', "/"))
    }

    /// Key of a top-level class-like type.
    pub fn top_level_type(package: &str, name: &str) -> Self {
        if package.is_empty() {
            Self(format!("L{name};"))
        } else {
            Self(format!("L{}/{name};", package.replace('.', "/")))
        }
    }

    /// Key of a type nested in `outer`. `suffix` is the simple name for
    /// member types, `<ordinal><name>` for local types and `<ordinal>` for
    /// anonymous ones.
    pub fn nested_type(outer: &BindingKey, suffix: &str) -> Self {
        let base = outer.0.strip_suffix(';').unwrap_or(&outer.0);
        Self(format!("{base}${suffix};"))
    }

    pub fn array(element: &BindingKey, dimensions: u32) -> Self {
        let mut key = "[".repeat(dimensions as usize);
        key.push_str(&element.0);
        Self(key)
    }

    pub fn method(
        declaring: &BindingKey,
        name: &str,
        parameters: &[&BindingKey],
        return_type: Option<&BindingKey>,
    ) -> Self {
        let mut key = format!("{}.{name}(", declaring.0);
        for param in parameters {
            key.push_str(&param.0);
        }
        key.push(')');
        if let Some(ret) = return_type {
            key.push_str(&ret.0);
        }
        Self(key)
    }

    pub fn field(declaring: &BindingKey, name: &str) -> Self {
        Self(format!("{}.{name})", declaring.0))
    }

    pub fn local(method: &BindingKey, name: &str, ordinal: u32) -> Self {
        Self(format!("{}#{name}#{ordinal}", method.0))
    }

    pub fn type_variable(owner: &BindingKey, name: &str) -> Self {
        Self(format!("{}:T{name};", owner.0))
    }

    pub fn parameterized(generic: &BindingKey, arguments: &[&BindingKey]) -> Self {
        let base = generic.0.strip_suffix(';').unwrap_or(&generic.0);
        let mut key = format!("{base}<");
        for arg in arguments {
            key.push_str(&arg.0);
        }
        key.push_str(">;");
        Self(key)
    }

    pub fn wildcard(bound: Option<(&BindingKey, bool)>) -> Self {
        match bound {
            None => Self("*".to_string()),
            Some((bound, true)) => Self(format!("+{}", bound.0)),
            Some((bound, false)) => Self(format!("-{}", bound.0)),
        }
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
