//! Parameter direction/array-mode classification.
//!
//! A parameter's category is a pure function of four facts: is it an array,
//! its in-flag, its out-flag, and its by-reference flag. The category is
//! never stored; it is recomputed from the records on every query, so there
//! is no redundant state to drift.
//!
//! | array | in | out | by-ref | category |
//! |-------|----|-----|--------|----------|
//! | yes   | yes| -   | -      | pass-array |
//! | yes   | no | yes | yes    | fill-array |
//! | yes   | no | yes | no     | receive-array |
//! | no    | yes| no  | -      | in |
//! | no    | no | yes | -      | out |
//!
//! Every combination outside the table is an invalid-metadata error.

use crate::{
    metadata::{
        signatures::SignatureParameter,
        tables::{Param, ParamRc},
    },
    Result,
};

/// Calling-convention category of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamCategory {
    /// Input, passed by value or reference into the callee
    In,
    /// Output, produced by the callee
    Out,
    /// Caller-provided input array
    PassArray,
    /// Caller-allocated array the callee fills in place
    FillArray,
    /// Callee-allocated array the caller receives
    ReceiveArray,
}

/// Classify a parameter per the direction/array decision table.
///
/// # Errors
/// Returns an invalid-metadata error, naming the parameter, for any flag
/// combination outside the table (e.g. an array parameter with neither
/// direction flag, or a non-array parameter flagged both in and out).
pub fn param_category(param: &Param, signature: &SignatureParameter) -> Result<ParamCategory> {
    if signature.is_szarray {
        if param.is_in() {
            Ok(ParamCategory::PassArray)
        } else if param.is_out() {
            if signature.by_ref {
                Ok(ParamCategory::FillArray)
            } else {
                Ok(ParamCategory::ReceiveArray)
            }
        } else {
            Err(invalid_metadata!(
                "array parameter '{}' has neither in nor out direction",
                param.name_or_empty()
            ))
        }
    } else if param.is_in() {
        if param.is_out() {
            Err(invalid_metadata!(
                "parameter '{}' is flagged both in and out",
                param.name_or_empty()
            ))
        } else {
            Ok(ParamCategory::In)
        }
    } else if param.is_out() {
        Ok(ParamCategory::Out)
    } else {
        Err(invalid_metadata!(
            "parameter '{}' has neither in nor out direction",
            param.name_or_empty()
        ))
    }
}

/// Whether the parameter occupies an input position in the calling
/// convention.
///
/// `in` and `pass-array` are inputs; `out` and `receive-array` are not. A
/// `fill-array` parameter's positioning is caller-policy-dependent and
/// unresolved at this layer, so asking is an error - callers needing the
/// distinction must handle that category explicitly.
///
/// # Errors
/// Fails on classification failure or on a fill-array parameter.
pub fn is_input(param: &Param, signature: &SignatureParameter) -> Result<bool> {
    match param_category(param, signature)? {
        ParamCategory::In | ParamCategory::PassArray => Ok(true),
        ParamCategory::Out | ParamCategory::ReceiveArray => Ok(false),
        ParamCategory::FillArray => Err(invalid_metadata!(
            "input positioning of fill-array parameter '{}' is caller-dependent",
            param.name_or_empty()
        )),
    }
}

/// Number of input-positional parameters in a list.
///
/// # Errors
/// Propagates any [`is_input`] failure.
pub fn count_inputs(params: &[(ParamRc, SignatureParameter)]) -> Result<usize> {
    let mut count = 0;
    for (param, signature) in params {
        if is_input(param, signature)? {
            count += 1;
        }
    }
    Ok(count)
}

/// Number of output-positional parameters in a list.
///
/// # Errors
/// Propagates any [`is_input`] failure.
pub fn count_outputs(params: &[(ParamRc, SignatureParameter)]) -> Result<usize> {
    let mut count = 0;
    for (param, signature) in params {
        if !is_input(param, signature)? {
            count += 1;
        }
    }
    Ok(count)
}
