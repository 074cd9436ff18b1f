//! Runtime mirror of result-type resolution.
//!
//! `resolve` applies the same ordered rules as the `ScalarBinaryOpTraits` impls, over runtime
//! `DType` tags. `Resolver` extends the built-in rules with a table of additional promotions;
//! additions may only fill pairs the existing rules leave unresolved.

use alloc::vec::Vec;

use log::trace;

use crate::error::ResolveError;

/// Runtime tag of an element type.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum DType {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `Complex<f32>`
    C32,
    /// `Complex<f64>`
    C64,
    /// The structural placeholder `NoScalar`.
    NoScalar,
}

impl DType {
    /// The complex type whose real component is `self`, if any.
    pub fn complex(self) -> Option<DType> {
        match self {
            DType::F32 => Some(DType::C32),
            DType::F64 => Some(DType::C64),
            _ => None,
        }
    }

    /// Whether the tag names a complex type.
    pub fn is_complex(self) -> bool {
        matches!(self, DType::C32 | DType::C64)
    }
}

/// Runtime tag of a binary operation.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum OpTag {
    /// `a + b`
    Sum,
    /// `a - b`
    Difference,
    /// `a * b`
    Product,
    /// `a / b`
    Quotient,
    /// Coefficient-wise minimum.
    Min,
    /// Coefficient-wise maximum.
    Max,
}

/// Applies the built-in resolution rules in order:
///
/// 1. identical types resolve to themselves,
/// 2. a complex type with its real component (either order) resolves to the complex type,
/// 3. the placeholder with any type (either order) resolves to the other type.
///
/// Rule 1 also covers two placeholders. Anything else is `ResolveError::Unresolved`.
pub fn resolve(lhs: DType, rhs: DType, op: OpTag) -> Result<DType, ResolveError> {
    if lhs == rhs {
        return Ok(lhs);
    }
    if lhs.complex() == Some(rhs) {
        return Ok(rhs);
    }
    if rhs.complex() == Some(lhs) {
        return Ok(lhs);
    }
    match (lhs, rhs) {
        (DType::NoScalar, t) | (t, DType::NoScalar) => Ok(t),
        _ => Err(ResolveError::Unresolved { lhs, rhs, op }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    lhs: DType,
    rhs: DType,
    op: Option<OpTag>,
    res: DType,
}

impl Rule {
    fn matches(&self, lhs: DType, rhs: DType, op: OpTag) -> bool {
        self.lhs == lhs && self.rhs == rhs && self.op.is_none_or(|o| o == op)
    }
}

/// Built-in rules followed by an ordered table of extension rules.
///
/// Lookup tries the built-in rules, then the extension rules in registration order; the first
/// match wins. Registration refuses any rule that would change an already-resolved pair, so the
/// table only ever grows the set of resolvable pairs.
#[derive(Debug, Default, Clone)]
pub struct Resolver {
    rules: Vec<Rule>,
}

impl Resolver {
    /// A resolver with only the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `lhs op rhs`.
    pub fn resolve(&self, lhs: DType, rhs: DType, op: OpTag) -> Result<DType, ResolveError> {
        resolve(lhs, rhs, op).or_else(|e| {
            self.rules
                .iter()
                .find(|r| r.matches(lhs, rhs, op))
                .map(|r| r.res)
                .ok_or(e)
        })
    }

    /// Registers `lhs op rhs -> res` for a single operation.
    pub fn register(
        &mut self,
        lhs: DType,
        rhs: DType,
        op: OpTag,
        res: DType,
    ) -> Result<(), ResolveError> {
        self.insert(Rule {
            lhs,
            rhs,
            op: Some(op),
            res,
        })
    }

    /// Registers `lhs rhs -> res` for every operation.
    pub fn register_all(&mut self, lhs: DType, rhs: DType, res: DType) -> Result<(), ResolveError> {
        self.insert(Rule {
            lhs,
            rhs,
            op: None,
            res,
        })
    }

    /// Registers a rule and its mirror image.
    ///
    /// Both directions are checked before either is stored, so on error the resolver is left
    /// unchanged.
    pub fn register_symmetric(
        &mut self,
        lhs: DType,
        rhs: DType,
        op: OpTag,
        res: DType,
    ) -> Result<(), ResolveError> {
        let rule = Rule {
            lhs,
            rhs,
            op: Some(op),
            res,
        };
        let mirror = Rule {
            lhs: rhs,
            rhs: lhs,
            ..rule.clone()
        };
        self.check(&rule)?;
        self.check(&mirror)?;
        self.push(rule);
        self.push(mirror);
        Ok(())
    }

    fn insert(&mut self, rule: Rule) -> Result<(), ResolveError> {
        self.check(&rule)?;
        self.push(rule);
        Ok(())
    }

    fn check(&self, rule: &Rule) -> Result<(), ResolveError> {
        let ops: &[OpTag] = match rule.op {
            Some(ref op) => core::slice::from_ref(op),
            None => &ALL_OPS,
        };
        for &op in ops {
            if let Ok(existing) = self.resolve(rule.lhs, rule.rhs, op) {
                if existing != rule.res {
                    return Err(ResolveError::Conflict {
                        lhs: rule.lhs,
                        rhs: rule.rhs,
                        op,
                        existing,
                        requested: rule.res,
                    });
                }
            }
        }
        Ok(())
    }

    fn push(&mut self, rule: Rule) {
        trace!(
            "registered promotion {:?} {:?} {:?} -> {:?}",
            rule.lhs, rule.op, rule.rhs, rule.res
        );
        self.rules.push(rule);
    }
}

const ALL_OPS: [OpTag; 6] = [
    OpTag::Sum,
    OpTag::Difference,
    OpTag::Product,
    OpTag::Quotient,
    OpTag::Min,
    OpTag::Max,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        functor::{BinaryOp, ScalarMaxOp, ScalarProductOp, ScalarSumOp},
        traits::NumTraits,
    };
    use num_complex::Complex;

    #[test]
    fn builtin_rules_are_symmetric() {
        assert_eq!(resolve(DType::F32, DType::F32, OpTag::Sum), Ok(DType::F32));
        assert_eq!(resolve(DType::C64, DType::F64, OpTag::Sum), Ok(DType::C64));
        assert_eq!(resolve(DType::F64, DType::C64, OpTag::Sum), Ok(DType::C64));
        assert_eq!(
            resolve(DType::NoScalar, DType::I32, OpTag::Product),
            Ok(DType::I32)
        );
        assert_eq!(
            resolve(DType::I32, DType::NoScalar, OpTag::Product),
            Ok(DType::I32)
        );
        assert_eq!(
            resolve(DType::NoScalar, DType::NoScalar, OpTag::Sum),
            Ok(DType::NoScalar)
        );
    }

    #[test]
    fn unrelated_pairs_are_unresolved() {
        assert_eq!(
            resolve(DType::F32, DType::F64, OpTag::Sum),
            Err(ResolveError::Unresolved {
                lhs: DType::F32,
                rhs: DType::F64,
                op: OpTag::Sum
            })
        );
        // real component of C64 is F64, not F32
        assert!(resolve(DType::C64, DType::F32, OpTag::Sum).is_err());
    }

    #[test]
    fn runtime_agrees_with_static_resolution() {
        fn check<L: NumTraits, R: NumTraits, F: BinaryOp<L, R>>()
        where
            F::Output: NumTraits,
        {
            assert_eq!(
                resolve(L::DTYPE, R::DTYPE, F::TAG),
                Ok(<F::Output as NumTraits>::DTYPE)
            );
        }
        check::<f32, f32, ScalarSumOp>();
        check::<i16, i16, ScalarMaxOp>();
        check::<Complex<f64>, f64, ScalarSumOp>();
        check::<f32, Complex<f32>, ScalarProductOp>();
    }

    #[test]
    fn registry_extends_unresolved_pairs() -> Result<(), anyhow::Error> {
        let mut resolver = Resolver::new();
        assert!(resolver.resolve(DType::I32, DType::F64, OpTag::Sum).is_err());

        resolver.register_symmetric(DType::I32, DType::F64, OpTag::Sum, DType::F64)?;
        assert_eq!(
            resolver.resolve(DType::I32, DType::F64, OpTag::Sum)?,
            DType::F64
        );
        assert_eq!(
            resolver.resolve(DType::F64, DType::I32, OpTag::Sum)?,
            DType::F64
        );
        assert!(
            resolver
                .resolve(DType::I32, DType::F64, OpTag::Product)
                .is_err()
        );

        resolver.register_all(DType::U8, DType::I16, DType::I16)?;
        assert_eq!(
            resolver.resolve(DType::U8, DType::I16, OpTag::Max)?,
            DType::I16
        );
        Ok(())
    }

    #[test]
    fn failed_symmetric_registration_leaves_resolver_unchanged() -> Result<(), anyhow::Error> {
        let mut resolver = Resolver::new();
        resolver.register(DType::I32, DType::F64, OpTag::Sum, DType::F64)?;

        // forward direction is free, the mirror conflicts with the rule above
        let err = resolver
            .register_symmetric(DType::F64, DType::I32, OpTag::Sum, DType::F32)
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::Conflict {
                lhs: DType::I32,
                rhs: DType::F64,
                op: OpTag::Sum,
                existing: DType::F64,
                requested: DType::F32,
            }
        );
        assert!(resolver.resolve(DType::F64, DType::I32, OpTag::Sum).is_err());
        assert_eq!(
            resolver.resolve(DType::I32, DType::F64, OpTag::Sum)?,
            DType::F64
        );

        resolver.register_symmetric(DType::F64, DType::I32, OpTag::Sum, DType::F64)?;
        assert_eq!(
            resolver.resolve(DType::F64, DType::I32, OpTag::Sum)?,
            DType::F64
        );
        Ok(())
    }

    #[test]
    fn registry_rejects_conflicting_rules() -> Result<(), anyhow::Error> {
        let mut resolver = Resolver::new();

        let err = resolver
            .register(DType::F32, DType::F32, OpTag::Sum, DType::F64)
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::Conflict {
                lhs: DType::F32,
                rhs: DType::F32,
                op: OpTag::Sum,
                existing: DType::F32,
                requested: DType::F64,
            }
        );

        resolver.register(DType::I32, DType::F32, OpTag::Sum, DType::F32)?;
        // agreeing duplicate is fine
        resolver.register(DType::I32, DType::F32, OpTag::Sum, DType::F32)?;
        assert!(
            resolver
                .register_all(DType::I32, DType::F32, DType::F64)
                .is_err()
        );
        assert_eq!(
            resolver.resolve(DType::I32, DType::F32, OpTag::Sum)?,
            DType::F32
        );
        Ok(())
    }
}
