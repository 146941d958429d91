use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use super::engine::{validate, RpcCommand, Validated};
use super::methods::{
    self, AccountInfoInput, AccountLinesInput, AccountTxInput, AmmInfoInput, BookOffersInput,
    LedgerInput, RandomInput, SubscribeInput,
};
use super::types::RpcSpec;
use crate::domain::rpc::{ProtocolError, Status};

/// Typed input of any registered command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandInput {
    AccountInfo(AccountInfoInput),
    AccountLines(AccountLinesInput),
    AccountTx(AccountTxInput),
    AmmInfo(AmmInfoInput),
    BookOffers(BookOffersInput),
    Ledger(LedgerInput),
    Random(RandomInput),
    Subscribe(SubscribeInput),
}

macro_rules! command_input_from {
    ($($variant:ident => $input:ty),* $(,)?) => {
        $(
            impl From<$input> for CommandInput {
                fn from(input: $input) -> Self {
                    CommandInput::$variant(input)
                }
            }
        )*
    };
}

command_input_from! {
    AccountInfo => AccountInfoInput,
    AccountLines => AccountLinesInput,
    AccountTx => AccountTxInput,
    AmmInfo => AmmInfoInput,
    BookOffers => BookOffersInput,
    Ledger => LedgerInput,
    Random => RandomInput,
    Subscribe => SubscribeInput,
}

type ValidateFn = fn(&mut Value, u32) -> Result<Validated<CommandInput>, Status>;
type SpecFn = fn(u32) -> &'static RpcSpec;

fn validate_as<C>(request: &mut Value, api_version: u32) -> Result<Validated<CommandInput>, Status>
where
    C: RpcCommand,
    CommandInput: From<C::Input>,
{
    validate::<C>(request, api_version).map(|validated| validated.map(CommandInput::from))
}

/// A registered command, erased to function pointers
#[derive(Clone, Copy)]
pub struct CommandEntry {
    name: &'static str,
    spec: SpecFn,
    validate: ValidateFn,
}

impl CommandEntry {
    pub fn of<C>() -> Self
    where
        C: RpcCommand,
        CommandInput: From<C::Input>,
    {
        Self {
            name: C::NAME,
            spec: C::spec,
            validate: validate_as::<C>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn spec(&self, api_version: u32) -> &'static RpcSpec {
        (self.spec)(api_version)
    }

    pub fn validate(&self, request: &mut Value, api_version: u32) -> Result<Validated<CommandInput>, Status> {
        (self.validate)(request, api_version)
    }
}

/// Method registry for RPC validation
pub struct MethodRegistry {
    commands: HashMap<&'static str, CommandEntry>,
}

impl MethodRegistry {
    /// Create a registry holding every built-in command
    pub fn new() -> Self {
        let mut registry = Self::empty();
        methods::register_all(&mut registry);
        registry
    }

    /// Create a registry with no commands
    pub fn empty() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command, replacing any previous entry of the same name
    pub fn register<C>(&mut self)
    where
        C: RpcCommand,
        CommandInput: From<C::Input>,
    {
        self.commands.insert(C::NAME, CommandEntry::of::<C>());
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Validate `request` as the named command
    pub fn validate(
        &self,
        name: &str,
        request: &mut Value,
        api_version: u32,
    ) -> Result<Validated<CommandInput>, Status> {
        let entry = self
            .get(name)
            .ok_or_else(|| Status::new(ProtocolError::UnknownCommand))?;
        entry.validate(request, api_version)
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}
