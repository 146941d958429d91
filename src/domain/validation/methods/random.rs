//! `random`: takes no parameters

use std::sync::LazyLock;

use serde::Serialize;

use crate::domain::validation::engine::RpcCommand;
use crate::domain::validation::fields::{FromValidated, ValidatedFields};
use crate::domain::validation::registry::MethodRegistry;
use crate::domain::validation::types::{ContractViolation, RpcSpec};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RandomInput {}

impl FromValidated for RandomInput {
    fn from_validated(_fields: &ValidatedFields<'_>) -> Result<Self, ContractViolation> {
        Ok(Self {})
    }
}

static SPEC: LazyLock<RpcSpec> = LazyLock::new(RpcSpec::default);

pub struct Random;

impl RpcCommand for Random {
    const NAME: &'static str = "random";
    type Input = RandomInput;

    fn spec(_api_version: u32) -> &'static RpcSpec {
        &SPEC
    }
}

pub fn register(registry: &mut MethodRegistry) {
    registry.register::<Random>();
}
