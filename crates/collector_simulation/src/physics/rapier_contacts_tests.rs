//! Tests for Rapier CollisionEvent → CollectorCommand forwarding.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use bevy_rapier3d::prelude::CollisionEvent;
    use bevy_rapier3d::rapier::geometry::CollisionEventFlags;
    use crate::collection::CollectorCommand;
    use crate::motion::Collector;
    use crate::physics::forward_rapier_contacts;
    use crate::targeting::CollectibleTarget;

    fn setup() -> (App, Entity, Entity) {
        let mut app = App::new();
        app.add_event::<CollisionEvent>()
            .add_event::<CollectorCommand>()
            .add_systems(Update, forward_rapier_contacts);

        let agent = app.world_mut().spawn(Collector).id();
        let target = app.world_mut().spawn(CollectibleTarget).id();
        (app, agent, target)
    }

    fn queued_commands(app: &mut App) -> Vec<CollectorCommand> {
        app.world_mut()
            .resource_mut::<Events<CollectorCommand>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_started_queues_contact_in_either_order() {
        let (mut app, agent, target) = setup();
        let second = app.world_mut().spawn(CollectibleTarget).id();

        app.world_mut()
            .send_event(CollisionEvent::Started(agent, target, CollisionEventFlags::SENSOR));
        app.world_mut()
            .send_event(CollisionEvent::Started(second, agent, CollisionEventFlags::SENSOR));
        app.update();

        assert_eq!(
            queued_commands(&mut app),
            vec![
                CollectorCommand::Contact { target },
                CollectorCommand::Contact { target: second },
            ]
        );
    }

    #[test]
    fn test_stopped_and_unrelated_pairs_ignored() {
        let (mut app, agent, target) = setup();
        let wall = app.world_mut().spawn_empty().id();

        app.world_mut()
            .send_event(CollisionEvent::Stopped(agent, target, CollisionEventFlags::SENSOR));
        app.world_mut()
            .send_event(CollisionEvent::Started(agent, wall, CollisionEventFlags::empty()));
        // Два target без агента
        let other = app.world_mut().spawn(CollectibleTarget).id();
        app.world_mut()
            .send_event(CollisionEvent::Started(target, other, CollisionEventFlags::SENSOR));
        app.update();

        assert!(queued_commands(&mut app).is_empty());
    }
}
