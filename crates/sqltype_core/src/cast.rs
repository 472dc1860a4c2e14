//! Which explicit casts are allowed.

use crate::datatype::{DataType, DataTypeId};

/// Source types that can be cast to some target.
#[derive(Debug, Clone, Copy)]
pub struct CastRule {
    pub target: DataTypeId,
    pub sources: &'static [DataTypeId],
}

/// Allowed casts by target type. NULL can always be cast.
pub const CAST_RULES: &[CastRule] = &[
    CastRule {
        target: DataTypeId::Boolean,
        sources: &[
            DataTypeId::Boolean,
            DataTypeId::Int,
            DataTypeId::Float,
            DataTypeId::Decimal,
            DataTypeId::String,
        ],
    },
    CastRule {
        target: DataTypeId::Int,
        sources: &[
            DataTypeId::Boolean,
            DataTypeId::Int,
            DataTypeId::Float,
            DataTypeId::Decimal,
            DataTypeId::String,
            DataTypeId::Date,
            DataTypeId::Timestamp,
            DataTypeId::Interval,
        ],
    },
    CastRule {
        target: DataTypeId::Float,
        sources: &[
            DataTypeId::Boolean,
            DataTypeId::Int,
            DataTypeId::Float,
            DataTypeId::Decimal,
            DataTypeId::String,
            DataTypeId::Date,
            DataTypeId::Timestamp,
            DataTypeId::Interval,
        ],
    },
    CastRule {
        target: DataTypeId::Decimal,
        sources: &[
            DataTypeId::Boolean,
            DataTypeId::Int,
            DataTypeId::Float,
            DataTypeId::Decimal,
            DataTypeId::String,
        ],
    },
    CastRule {
        target: DataTypeId::String,
        sources: &[
            DataTypeId::Boolean,
            DataTypeId::Int,
            DataTypeId::Float,
            DataTypeId::Decimal,
            DataTypeId::String,
            DataTypeId::Bytes,
            DataTypeId::Date,
            DataTypeId::Timestamp,
            DataTypeId::Interval,
        ],
    },
    CastRule {
        target: DataTypeId::Bytes,
        sources: &[DataTypeId::Bytes, DataTypeId::String],
    },
    CastRule {
        target: DataTypeId::Date,
        sources: &[DataTypeId::String, DataTypeId::Date, DataTypeId::Timestamp],
    },
    CastRule {
        target: DataTypeId::Timestamp,
        sources: &[DataTypeId::String, DataTypeId::Date, DataTypeId::Timestamp],
    },
    CastRule {
        target: DataTypeId::Interval,
        sources: &[
            DataTypeId::Int,
            DataTypeId::Float,
            DataTypeId::String,
            DataTypeId::Interval,
        ],
    },
];

/// Find the cast rule for a target type.
pub fn find_cast_rule(target: DataTypeId) -> Option<&'static CastRule> {
    CAST_RULES.iter().find(|rule| rule.target == target)
}

/// Check if a value of type `from` can be explicitly cast to `to`.
pub fn can_cast(from: &DataType, to: &DataType) -> bool {
    let Some(rule) = find_cast_rule(to.datatype_id()) else {
        return false;
    };
    from.is_null() || rule.sources.contains(&from.datatype_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_casts() {
        assert!(can_cast(&DataType::String, &DataType::Date));
        assert!(can_cast(&DataType::Float, &DataType::Decimal));
        assert!(can_cast(&DataType::Null, &DataType::Int));
        assert!(can_cast(&DataType::Interval, &DataType::String));
    }

    #[test]
    fn rejected_casts() {
        assert!(!can_cast(&DataType::Int, &DataType::Date));
        assert!(!can_cast(&DataType::Int, &DataType::Timestamp));
        assert!(!can_cast(&DataType::Date, &DataType::Interval));
        // Tuple and NULL are never targets.
        assert!(!can_cast(&DataType::Null, &DataType::Null));
        assert!(!can_cast(
            &DataType::Tuple(vec![DataType::Int]),
            &DataType::Tuple(vec![DataType::Int])
        ));
    }
}
