use std::sync::Mutex;

use crate::coercion::{CoercionGateway, StandardGateway};
use crate::declaration::CoercionOptions;
use crate::error::CoercionError;
use crate::types::AttrType;
use crate::value::Value;

/// One call seen by a [`RecordingGateway`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub ty: AttrType,
    pub value: Value,
    pub options: CoercionOptions,
}

/// Gateway that records every call, then delegates to [`StandardGateway`].
#[derive(Debug, Default)]
pub struct RecordingGateway {
    inner: StandardGateway,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl CoercionGateway for RecordingGateway {
    fn coerce(
        &self,
        ty: &AttrType,
        value: Value,
        options: &CoercionOptions,
    ) -> Result<Value, CoercionError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedCall {
                ty: ty.clone(),
                value: value.clone(),
                options: options.clone(),
            });
        self.inner.coerce(ty, value, options)
    }
}
