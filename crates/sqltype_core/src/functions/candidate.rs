//! Picking a signature when the arguments don't match one exactly.

use tracing::{debug, trace};

use super::Signature;
use crate::bindings::PlaceholderTypes;
use crate::datatype::{DataType, DataTypeId};
use crate::errors::{Result, TypeCheckError};
use crate::expr::TypedExpr;
use crate::unify::{Item, UnifyError, unify};

/// A signature that the arguments could be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CandidateSignature {
    pub signature: &'static Signature,
    /// Number of arguments that match without any conversion.
    pub score: usize,
}

impl CandidateSignature {
    /// Find candidate signatures for the given arguments.
    ///
    /// When `prefer_exact` is set, candidates are ordered by score (highest
    /// first), otherwise they stay in registration order. Ties always keep
    /// registration order.
    pub fn find_candidates(
        signatures: impl IntoIterator<Item = &'static Signature>,
        args: &[Item],
        bindings: &PlaceholderTypes,
        prefer_exact: bool,
    ) -> Vec<Self> {
        let mut candidates = Vec::new();

        'sigs: for signature in signatures {
            if !signature.accepts_arity(args.len()) {
                continue;
            }

            let mut score = 0;
            for (idx, arg) in args.iter().enumerate() {
                let Some(expected) = signature.arg_id(idx) else {
                    continue 'sigs;
                };
                match arg_matches(arg, expected, bindings) {
                    Some(true) => score += 1,
                    Some(false) => (),
                    None => continue 'sigs,
                }
            }

            candidates.push(CandidateSignature { signature, score });
        }

        if prefer_exact {
            // Stable, ties keep registration order.
            candidates.sort_by(|a, b| b.score.cmp(&a.score));
        }

        candidates
    }
}

/// Check if an argument can be used where `expected` is wanted.
///
/// Returns Some(true) if it matches without conversion, Some(false) if it
/// needs one, and None if it can't match at all.
fn arg_matches(arg: &Item, expected: DataTypeId, bindings: &PlaceholderTypes) -> Option<bool> {
    match arg {
        Item::Null => Some(false),
        Item::Constant(c) => {
            if expected == DataTypeId::Any {
                return Some(true);
            }
            let datatype = DataType::try_default_datatype(expected)?;
            c.can_represent(&datatype)
                .then(|| c.natural_type() == datatype)
        }
        Item::Placeholder(p) => match bindings.get(&p.name) {
            Some(bound) => bound.matches_id(expected).then_some(true),
            None => Some(false),
        },
        Item::Typed(expr) => {
            if expr.datatype.is_null() {
                Some(false)
            } else {
                expr.datatype.matches_id(expected).then_some(true)
            }
        }
        // Tuple literals only match arguments accepting anything. Same-typed
        // tuple comparisons are handled before candidates are considered.
        Item::Tuple(_) => (expected == DataTypeId::Any).then_some(true),
        Item::Witness { .. } => None,
    }
}

/// A call with its chosen signature and typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedCall {
    pub signature: &'static Signature,
    pub args: Vec<TypedExpr>,
    pub return_type: DataType,
}

/// Resolve a call against a list of signatures.
///
/// Candidates are tried in order, the first one whose arguments can be typed
/// is used. Returns None if no signature fits.
pub(crate) fn resolve_call(
    signatures: impl IntoIterator<Item = &'static Signature>,
    args: Vec<Item>,
    bindings: &mut PlaceholderTypes,
    prefer_exact: bool,
) -> Result<Option<ResolvedCall>> {
    let candidates =
        CandidateSignature::find_candidates(signatures, &args, bindings, prefer_exact);
    trace!(?candidates, "found candidate signatures");

    for candidate in candidates {
        let mut scratch = bindings.clone();
        if let Some(resolved) = try_signature(candidate.signature, &args, &mut scratch)? {
            debug!(signature = %candidate.signature, score = candidate.score, "selected signature");
            *bindings = scratch;
            return Ok(Some(resolved));
        }
    }

    Ok(None)
}

/// Type the arguments for a single signature.
///
/// Returns None if some argument doesn't end up with the expected type.
fn try_signature(
    signature: &'static Signature,
    args: &[Item],
    bindings: &mut PlaceholderTypes,
) -> Result<Option<ResolvedCall>> {
    let mut typed: Vec<Option<TypedExpr>> = vec![None; args.len()];
    let mut any_type: Option<DataType> = None;

    if signature.homogeneous {
        let positions: Vec<usize> = (0..args.len())
            .filter(|&idx| signature.arg_id(idx) == Some(DataTypeId::Any))
            .collect();

        if !positions.is_empty() {
            let group = positions.iter().map(|&idx| args[idx].clone()).collect();
            let unified = match unify(group, None, bindings) {
                Ok(unified) => unified,
                Err(UnifyError::Mismatch(_)) => return Ok(None),
                Err(UnifyError::Failed(err)) => return Err(err),
            };
            for (&idx, expr) in positions.iter().zip(unified.exprs) {
                typed[idx] = Some(expr);
            }
            any_type = Some(unified.datatype);
        }
    }

    for (idx, arg) in args.iter().enumerate() {
        if typed[idx].is_some() {
            continue;
        }
        let expected = signature
            .arg_id(idx)
            .ok_or_else(|| TypeCheckError::Internal(format!("no argument {idx} in signature")))?;
        let desired = DataType::try_default_datatype(expected);

        let unified = match unify(vec![arg.clone()], desired.as_ref(), bindings) {
            Ok(unified) => unified,
            Err(UnifyError::Mismatch(_)) => return Ok(None),
            Err(UnifyError::Failed(err)) => return Err(err),
        };
        if !unified.datatype.is_null() && !unified.datatype.matches_id(expected) {
            return Ok(None);
        }
        if expected == DataTypeId::Any && any_type.is_none() {
            any_type = Some(unified.datatype.clone());
        }
        typed[idx] = unified.exprs.into_iter().next();
    }

    let args = typed
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| TypeCheckError::Internal("argument left untyped".to_string()))?;

    let return_type = signature_return_type(signature, any_type)?;

    Ok(Some(ResolvedCall {
        signature,
        args,
        return_type,
    }))
}

/// Compute the return type of a signature.
///
/// `any_type` is the type the `Any` arguments were unified to.
pub(crate) fn signature_return_type(
    signature: &Signature,
    any_type: Option<DataType>,
) -> Result<DataType> {
    match signature.return_type {
        DataTypeId::Any => Ok(any_type.unwrap_or(DataType::Null)),
        id => DataType::try_default_datatype(id).ok_or_else(|| {
            TypeCheckError::Internal(format!("cannot build return type from {id}"))
        }),
    }
}
