use std::fmt;

use fnv::FnvHashMap;

use crate::graph::Node;
use crate::model::{ModelError, VarId, VarKind};

/// The three variable families of the burning program. The key is the identity
/// of a variable; the registry turns keys into dense ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum VarKey {
    /// x: node is the freely ignited source at the given step.
    Ignition { node: Node, step: u32 },
    /// y: the step at which the node first burns.
    BurnTime { node: Node },
    /// z: the node's burning is explained by fire arriving from the igniter.
    Spread { node: Node, igniter: Node },
}

impl VarKey {
    pub(crate) fn kind(&self) -> VarKind {
        match self {
            VarKey::Ignition { .. } => VarKind::Binary,
            VarKey::BurnTime { .. } => VarKind::NonNegative,
            VarKey::Spread { .. } => VarKind::Binary,
        }
    }

    pub(crate) fn name(&self) -> String {
        match self {
            VarKey::Ignition { node, step } => format!("x-{}-{}", node.id(), step),
            VarKey::BurnTime { node } => format!("y-{}", node.id()),
            VarKey::Spread { node, igniter } => format!("z-{}-{}", node.id(), igniter.id()),
        }
    }
}

impl fmt::Debug for VarKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct VariableRegister {
    keys: Vec<VarKey>,
    ids: FnvHashMap<VarKey, VarId>,
}

impl VariableRegister {
    pub(crate) fn new() -> VariableRegister {
        VariableRegister {
            keys: vec![],
            ids: FnvHashMap::default(),
        }
    }

    pub(crate) fn create(&mut self, key: VarKey) -> Result<VarId, ModelError> {
        if self.ids.contains_key(&key) {
            return Err(ModelError::DuplicateVariable(key.name()));
        }
        let id = VarId(self.keys.len());
        self.keys.push(key);
        self.ids.insert(key, id);
        Ok(id)
    }

    pub(crate) fn get(&self, key: VarKey) -> VarId {
        *self.ids.get(&key).unwrap()
    }

    pub(crate) fn kind(&self, id: VarId) -> VarKind {
        self.keys[id.index()].kind()
    }

    pub(crate) fn name(&self, id: VarId) -> String {
        self.keys[id.index()].name()
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (VarId, &VarKey)> + '_ {
        self.keys.iter().enumerate().map(|(ix, key)| (VarId(ix), key))
    }
}
