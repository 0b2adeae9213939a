//! AgentRegistry - typed collections of every live agent.
//!
//! Each role has its own `BTreeMap`, so iterating a phase visits agents in
//! id order and the run is reproducible for a given seed. A role index
//! (`roles`) answers "is this id alive, and what is it" in one lookup.
//!
//! The scheduler drives an agent by taking it out of its collection,
//! letting it act against the [`Habitat`], and restoring it afterwards.
//! An agent that died during its own turn has already been forgotten and
//! is not restored.

use crate::forager::Forager;
use crate::invader::Invader;
use crate::lifecycle::Habitat;
use crate::queen::Queen;
use crate::scout::Scout;
use crate::soldier::Soldier;
use formica_core::prelude::*;
use std::collections::BTreeMap;

/// An agent type stored in its own registry collection.
pub trait Member: Sized {
    const ROLE: Role;

    /// Identity, age and location of this member.
    fn card(&self) -> &Vitals;

    fn roster(registry: &AgentRegistry) -> &BTreeMap<AgentId, Self>;

    fn roster_mut(registry: &mut AgentRegistry) -> &mut BTreeMap<AgentId, Self>;

    /// Run one tick of this member's behaviour.
    fn take_turn(&mut self, hab: &mut Habitat<'_>) -> Result<LifeState>;
}

/// Every live agent, by role.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    next_id: u64,
    roles: BTreeMap<AgentId, Role>,
    queens: BTreeMap<AgentId, Queen>,
    foragers: BTreeMap<AgentId, Forager>,
    scouts: BTreeMap<AgentId, Scout>,
    soldiers: BTreeMap<AgentId, Soldier>,
    invaders: BTreeMap<AgentId, Invader>,
    created: u64,
    died: u64,
    collapsed: bool,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an agent of `role` on `pos` and register it on the grid.
    ///
    /// Ids are assigned in creation order and never reused. A second queen
    /// is rejected with `InvalidRole`, as is any creation after collapse.
    pub fn create(&mut self, grid: &mut Grid, role: Role, pos: CellPos) -> Result<AgentId> {
        grid.check(pos)?;
        if role == Role::Queen && (self.collapsed || self.queen_id().is_some()) {
            return Err(FormicaError::invalid_role(role, "create (queen already exists)"));
        }

        let id = AgentId(self.next_id);
        self.next_id += 1;

        match role {
            Role::Queen => {
                self.queens.insert(id, Queen::new(id, pos));
                grid.set_discovered(pos, true)?;
            }
            Role::Forager => {
                self.foragers.insert(id, Forager::new(id, pos));
            }
            Role::Scout => {
                self.scouts.insert(id, Scout::new(id, pos));
            }
            Role::Soldier => {
                self.soldiers.insert(id, Soldier::new(id, pos));
            }
            Role::Invader => {
                self.invaders.insert(id, Invader::new(id, pos));
            }
        }
        self.roles.insert(id, role);
        self.created += 1;
        grid.arrive(pos, id, role);
        Ok(id)
    }

    /// Drop `id` from the registry. Grid bookkeeping is the caller's job.
    ///
    /// Forgetting the queen collapses the colony.
    pub fn forget(&mut self, id: AgentId) -> Option<Role> {
        let role = self.roles.remove(&id)?;
        match role {
            Role::Queen => {
                self.queens.remove(&id);
                self.collapsed = true;
            }
            Role::Forager => {
                self.foragers.remove(&id);
            }
            Role::Scout => {
                self.scouts.remove(&id);
            }
            Role::Soldier => {
                self.soldiers.remove(&id);
            }
            Role::Invader => {
                self.invaders.remove(&id);
            }
        }
        self.died += 1;
        Some(role)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.roles.contains_key(&id)
    }

    pub fn role_of(&self, id: AgentId) -> Option<Role> {
        self.roles.get(&id).copied()
    }

    /// Snapshot of the ids currently alive in `role`, in id order.
    pub fn ids(&self, role: Role) -> Vec<AgentId> {
        self.roles
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Live agents of `role`, including any currently taken out.
    pub fn population(&self, role: Role) -> usize {
        self.roles.values().filter(|r| **r == role).count()
    }

    /// Vitals of a registered agent that is not currently taken out.
    pub fn vitals(&self, id: AgentId) -> Option<&Vitals> {
        match self.role_of(id)? {
            Role::Queen => self.get::<Queen>(id).map(Member::card),
            Role::Forager => self.get::<Forager>(id).map(Member::card),
            Role::Scout => self.get::<Scout>(id).map(Member::card),
            Role::Soldier => self.get::<Soldier>(id).map(Member::card),
            Role::Invader => self.get::<Invader>(id).map(Member::card),
        }
    }

    pub fn get<T: Member>(&self, id: AgentId) -> Option<&T> {
        T::roster(self).get(&id)
    }

    pub fn get_mut<T: Member>(&mut self, id: AgentId) -> Option<&mut T> {
        T::roster_mut(self).get_mut(&id)
    }

    /// Iterate the members of one role in id order.
    pub fn iter<'a, T: Member + 'a>(&'a self) -> impl Iterator<Item = &'a T> {
        T::roster(self).values()
    }

    /// Remove a member so it can act with mutable access to the registry.
    pub fn take<T: Member>(&mut self, id: AgentId) -> Option<T> {
        T::roster_mut(self).remove(&id)
    }

    /// Put back a member obtained from [`AgentRegistry::take`].
    ///
    /// Returns false (and drops the member) if it died while taken out.
    pub fn restore<T: Member>(&mut self, member: T) -> bool {
        let id = member.card().id;
        if self.role_of(id) != Some(T::ROLE) {
            return false;
        }
        T::roster_mut(self).insert(id, member);
        true
    }

    pub fn queen(&self) -> Option<&Queen> {
        self.queens.values().next()
    }

    pub fn queen_id(&self) -> Option<AgentId> {
        self.roles
            .iter()
            .find(|(_, r)| **r == Role::Queen)
            .map(|(id, _)| *id)
    }

    /// True once the queen has been forgotten.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Agents ever created (hatched or spawned).
    pub fn total_created(&self) -> u64 {
        self.created
    }

    pub fn total_died(&self) -> u64 {
        self.died
    }

    /// Number of live agents across all roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Member for Queen {
    const ROLE: Role = Role::Queen;

    fn card(&self) -> &Vitals {
        self.vitals()
    }

    fn roster(registry: &AgentRegistry) -> &BTreeMap<AgentId, Self> {
        &registry.queens
    }

    fn roster_mut(registry: &mut AgentRegistry) -> &mut BTreeMap<AgentId, Self> {
        &mut registry.queens
    }

    fn take_turn(&mut self, hab: &mut Habitat<'_>) -> Result<LifeState> {
        self.act(hab)
    }
}

impl Member for Forager {
    const ROLE: Role = Role::Forager;

    fn card(&self) -> &Vitals {
        Mobile::vitals(self)
    }

    fn roster(registry: &AgentRegistry) -> &BTreeMap<AgentId, Self> {
        &registry.foragers
    }

    fn roster_mut(registry: &mut AgentRegistry) -> &mut BTreeMap<AgentId, Self> {
        &mut registry.foragers
    }

    fn take_turn(&mut self, hab: &mut Habitat<'_>) -> Result<LifeState> {
        self.act(hab)
    }
}

impl Member for Scout {
    const ROLE: Role = Role::Scout;

    fn card(&self) -> &Vitals {
        Mobile::vitals(self)
    }

    fn roster(registry: &AgentRegistry) -> &BTreeMap<AgentId, Self> {
        &registry.scouts
    }

    fn roster_mut(registry: &mut AgentRegistry) -> &mut BTreeMap<AgentId, Self> {
        &mut registry.scouts
    }

    fn take_turn(&mut self, hab: &mut Habitat<'_>) -> Result<LifeState> {
        self.act(hab)
    }
}

impl Member for Soldier {
    const ROLE: Role = Role::Soldier;

    fn card(&self) -> &Vitals {
        Mobile::vitals(self)
    }

    fn roster(registry: &AgentRegistry) -> &BTreeMap<AgentId, Self> {
        &registry.soldiers
    }

    fn roster_mut(registry: &mut AgentRegistry) -> &mut BTreeMap<AgentId, Self> {
        &mut registry.soldiers
    }

    fn take_turn(&mut self, hab: &mut Habitat<'_>) -> Result<LifeState> {
        self.act(hab)
    }
}

impl Member for Invader {
    const ROLE: Role = Role::Invader;

    fn card(&self) -> &Vitals {
        Mobile::vitals(self)
    }

    fn roster(registry: &AgentRegistry) -> &BTreeMap<AgentId, Self> {
        &registry.invaders
    }

    fn roster_mut(registry: &mut AgentRegistry) -> &mut BTreeMap<AgentId, Self> {
        &mut registry.invaders
    }

    fn take_turn(&mut self, hab: &mut Habitat<'_>) -> Result<LifeState> {
        self.act(hab)
    }
}
