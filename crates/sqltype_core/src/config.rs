use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::errors::{Result, TypeCheckError};
use crate::scalar::ScalarValue;

pub const DEFAULT_MAX_EXPRESSION_DEPTH: u64 = 1024;

/// Configuration for a type checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCheckConfig {
    /// Maximum nesting depth of an expression. Zero disables the check.
    pub max_expression_depth: u64,
    /// Prefer overloads needing the fewest conversions.
    pub prefer_exact_signatures: bool,
}

impl Default for TypeCheckConfig {
    fn default() -> Self {
        TypeCheckConfig {
            max_expression_depth: DEFAULT_MAX_EXPRESSION_DEPTH,
            prefer_exact_signatures: true,
        }
    }
}

impl TypeCheckConfig {
    pub fn set_from_scalar(&mut self, name: &str, value: ScalarValue) -> Result<()> {
        let func = SETTING_FUNCTIONS
            .get(name)
            .ok_or_else(|| TypeCheckError::UnknownSetting(name.to_string()))?;

        (func.set)(value, self)
    }

    pub fn get_as_scalar(&self, name: &str) -> Result<ScalarValue> {
        let func = SETTING_FUNCTIONS
            .get(name)
            .ok_or_else(|| TypeCheckError::UnknownSetting(name.to_string()))?;

        Ok((func.get)(self))
    }

    /// Reset a setting to its default value.
    pub fn reset(&mut self, name: &str) -> Result<()> {
        let def_conf = Self::default();
        let func = SETTING_FUNCTIONS
            .get(name)
            .ok_or_else(|| TypeCheckError::UnknownSetting(name.to_string()))?;

        let scalar = (func.get)(&def_conf);
        (func.set)(scalar, self)
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Names and descriptions of all settings, ordered by name.
    pub fn settings() -> impl Iterator<Item = (&'static str, &'static str)> {
        SETTING_FUNCTIONS
            .iter()
            .map(|(name, func)| (*name, func.description))
    }
}

struct SettingFunctions {
    description: &'static str,
    set: fn(scalar: ScalarValue, conf: &mut TypeCheckConfig) -> Result<()>,
    get: fn(conf: &TypeCheckConfig) -> ScalarValue,
}

impl SettingFunctions {
    const fn new<S: TypeCheckSetting>() -> Self {
        SettingFunctions {
            description: S::DESCRIPTION,
            set: S::set_from_scalar as _,
            get: S::get_as_scalar as _,
        }
    }
}

fn insert_setting<S: TypeCheckSetting>(map: &mut BTreeMap<&'static str, SettingFunctions>) {
    if map.insert(S::NAME, SettingFunctions::new::<S>()).is_some() {
        panic!("Duplicate settings names: {}", S::NAME);
    }
}

static SETTING_FUNCTIONS: LazyLock<BTreeMap<&'static str, SettingFunctions>> =
    LazyLock::new(|| {
        let mut map = BTreeMap::new();

        insert_setting::<MaxExpressionDepth>(&mut map);
        insert_setting::<PreferExactSignatures>(&mut map);

        map
    });

pub trait TypeCheckSetting: Sync + Send + 'static {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn set_from_scalar(scalar: ScalarValue, conf: &mut TypeCheckConfig) -> Result<()>;
    fn get_as_scalar(conf: &TypeCheckConfig) -> ScalarValue;
}

pub struct MaxExpressionDepth;

impl TypeCheckSetting for MaxExpressionDepth {
    const NAME: &'static str = "max_expression_depth";
    const DESCRIPTION: &'static str =
        "Maximum nesting depth of a type checked expression, 0 for unlimited";

    fn set_from_scalar(scalar: ScalarValue, conf: &mut TypeCheckConfig) -> Result<()> {
        let val = scalar
            .try_as_i64()
            .and_then(|v| u64::try_from(v).ok())
            .ok_or_else(|| TypeCheckError::InvalidSettingValue {
                name: Self::NAME,
                value: scalar.to_string(),
            })?;
        conf.max_expression_depth = val;
        Ok(())
    }

    fn get_as_scalar(conf: &TypeCheckConfig) -> ScalarValue {
        // Depths past i64::MAX are effectively unlimited.
        ScalarValue::Int(i64::try_from(conf.max_expression_depth).unwrap_or(i64::MAX))
    }
}

pub struct PreferExactSignatures;

impl TypeCheckSetting for PreferExactSignatures {
    const NAME: &'static str = "prefer_exact_signatures";
    const DESCRIPTION: &'static str =
        "Prefer function overloads that need the fewest implicit conversions";

    fn set_from_scalar(scalar: ScalarValue, conf: &mut TypeCheckConfig) -> Result<()> {
        let val = scalar
            .try_as_bool()
            .ok_or_else(|| TypeCheckError::InvalidSettingValue {
                name: Self::NAME,
                value: scalar.to_string(),
            })?;
        conf.prefer_exact_signatures = val;
        Ok(())
    }

    fn get_as_scalar(conf: &TypeCheckConfig) -> ScalarValue {
        ScalarValue::Boolean(conf.prefer_exact_signatures)
    }
}
