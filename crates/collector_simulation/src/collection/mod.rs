//! Collection domain - очередь команд, событие сбора, score
//!
//! Заменяет статические ссылки и delegate-подписки оригинальной сцены:
//! - spawn/contact → CollectorCommand (очередь, применяется в начале тика)
//! - "сфера собрана" → CollectionSink (Score) + TargetCollected event
//! - particles → EffectSink (CollectEffectRequested event)

pub mod events;
pub mod sink;
pub mod systems;


pub use events::*;
pub use sink::*;
pub use systems::*;
