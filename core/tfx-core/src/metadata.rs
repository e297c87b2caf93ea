//! Result Metadata: static shape of a transform's output

use arrow::datatypes::DataType;

/// 결과 메타데이터 (출력 타입, 단일값 여부, 사전 인코딩 여부)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMetadata {
    data_type: DataType,
    single_value: bool,
    has_dictionary: bool,
}

/// Output of every computed numeric transform.
pub static DOUBLE_SV_NO_DICTIONARY: ResultMetadata = ResultMetadata {
    data_type: DataType::Float64,
    single_value: true,
    has_dictionary: false,
};

impl ResultMetadata {
    pub const fn new(data_type: DataType, single_value: bool, has_dictionary: bool) -> Self {
        Self {
            data_type,
            single_value,
            has_dictionary,
        }
    }

    /// Derive metadata from an Arrow column type. List-like types are multi-value,
    /// dictionary-encoded types report their value type.
    pub fn from_arrow(data_type: &DataType) -> Self {
        match data_type {
            DataType::List(field)
            | DataType::LargeList(field)
            | DataType::FixedSizeList(field, _) => {
                Self::new(field.data_type().clone(), false, false)
            }
            DataType::Dictionary(_, value_type) => Self::new(value_type.as_ref().clone(), true, true),
            other => Self::new(other.clone(), true, false),
        }
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn is_single_value(&self) -> bool {
        self.single_value
    }

    pub fn has_dictionary(&self) -> bool {
        self.has_dictionary
    }
}
