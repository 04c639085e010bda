//! Combat system

pub mod damage;
pub mod magic;

pub use damage::{bonuses_of, physical_damage_of, resolve_attack, AttackResult, DamageResult};
pub use magic::{cast_beam, cast_bolt, cast_spell, hostiles_at, CastOutcome, Spell, SpellKind};
