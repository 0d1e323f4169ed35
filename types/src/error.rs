//! Errors raised while constructing fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("identity must not be empty")]
    EmptyIdentity,

    #[error("identity {0:?} contains whitespace")]
    InvalidIdentity(String),

    #[error("unknown round policy: {0}")]
    UnknownPolicy(String),
}
