//! Property tests over whole-world behaviour

use std::f32::consts::TAU;

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use orbit_path::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use orbit_path::sim::{
    BodyId, BodyVariant, GravitationalBody, InputIntent, Orbit, Ship, ShipStep, Viewport,
    spawn_body, step_ship,
};
use orbit_path::{GameSettings, ManualTicks, Session, SessionEvents, TickSource};

fn any_settings() -> impl Strategy<Value = GameSettings> {
    (
        -5.0f32..20.0,
        -0.1f32..0.5,
        0.0f32..400.0,
        0.0f32..120.0,
        0.0f32..3.0,
        0.0f32..4.0,
    )
        .prop_map(|(speed, orbit, range, t1, t2, t3)| GameSettings {
            initial_speed: speed,
            orbit_rotation_speed: orbit,
            gravity_range: range,
            tier1_range: t1,
            tier2_range: t2,
            tier3_range: t3,
        })
}

fn any_variant() -> impl Strategy<Value = BodyVariant> {
    prop_oneof![
        Just(BodyVariant::Normal),
        Just(BodyVariant::Pulsar),
        Just(BodyVariant::Singularity),
        Just(BodyVariant::Repulsor),
        Just(BodyVariant::Binary),
    ]
}

fn any_spin() -> impl Strategy<Value = f32> {
    prop_oneof![Just(1.0f32), Just(-1.0f32)]
}

#[derive(Default)]
struct Recorder {
    scores: Vec<u32>,
    game_overs: Vec<u32>,
    after_game_over: usize,
}

impl SessionEvents for Recorder {
    fn on_score_update(&mut self, score: u32) {
        if !self.game_overs.is_empty() {
            self.after_game_over += 1;
        }
        self.scores.push(score);
    }

    fn on_game_over(&mut self, final_score: u32) {
        if !self.game_overs.is_empty() {
            self.after_game_over += 1;
        }
        self.game_overs.push(final_score);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn zones_stay_nested_for_any_settings(settings in any_settings(), seed in any::<u64>()) {
        let sanitized = settings.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        for i in 0..50 {
            let body = spawn_body(BodyId(i), -(i as f32) * 450.0, i % 4 == 0, &sanitized, &mut rng);
            prop_assert!(body.radius < body.inner_radius);
            prop_assert!(body.inner_radius < body.mid_radius);
            prop_assert!(body.mid_radius < body.gravity_radius);
            prop_assert!(body.orbit_speed.is_finite() && body.orbit_speed > 0.0);
        }
    }

    #[test]
    fn free_flight_keeps_speed(
        speed in 3.0f32..10.0,
        heading in 0.0f32..TAU,
        bearing in 0.0f32..TAU,
        distance in 0.0f32..400.0,
        radius in 25.0f32..70.0,
        variant in any_variant(),
        spin in any_spin(),
        held in any::<bool>(),
    ) {
        let body = GravitationalBody::new(
            BodyId(1),
            Vec2::new(375.0, 0.0),
            radius,
            variant,
            spin,
            &GameSettings::default(),
        );
        let mut ship = Ship::launch(speed);
        ship.pos = body.pos + Vec2::from_angle(bearing) * distance;
        ship.vel = Vec2::from_angle(heading) * speed;

        let intent = if held { InputIntent::holding(Some(body.id)) } else { InputIntent::default() };
        let step = step_ship(&mut ship, std::slice::from_ref(&body), &intent, speed);

        prop_assert!(ship.pos.is_finite() && ship.vel.is_finite());
        prop_assert!((ship.vel.length() - speed).abs() < 1e-3 * speed);
        if !held {
            prop_assert_eq!(step, ShipStep::Coasting);
        }
        if step == ShipStep::Captured {
            prop_assert!(ship.pos.distance(body.pos) < body.inner_radius);
        }
    }

    #[test]
    fn singularity_orbit_only_tightens(
        radius in 25.0f32..70.0,
        start in 0.0f32..1.0,
        spin in any_spin(),
        frames in 1usize..400,
    ) {
        let body = GravitationalBody::new(
            BodyId(3),
            Vec2::ZERO,
            radius,
            BodyVariant::Singularity,
            spin,
            &GameSettings::default(),
        );
        // Captures can land anywhere between the collision margin and the capture ring
        let floor = body.radius + 15.0;
        let lowest = body.radius + 12.0;
        let r0 = lowest + start * (body.inner_radius - lowest);
        let mut ship = Ship::launch(5.5);
        ship.orbit = Some(Orbit { body: body.id, angle: 0.0, radius: r0 });

        let intent = InputIntent::holding(Some(body.id));
        let mut last = r0;
        for _ in 0..frames {
            prop_assert_eq!(step_ship(&mut ship, std::slice::from_ref(&body), &intent, 5.5), ShipStep::Orbiting);
            let r = ship.orbit.map(|o| o.radius).unwrap_or(f32::NAN);
            prop_assert!(r <= last);
            prop_assert!(r >= r0.min(floor) - 1e-4);
            last = r;
        }
    }

    #[test]
    fn repulsor_orbit_only_widens_until_ejected(
        radius in 25.0f32..70.0,
        spin in any_spin(),
    ) {
        let body = GravitationalBody::new(
            BodyId(4),
            Vec2::ZERO,
            radius,
            BodyVariant::Repulsor,
            spin,
            &GameSettings::default(),
        );
        let mut ship = Ship::launch(5.5);
        ship.orbit = Some(Orbit { body: body.id, angle: 0.0, radius: body.inner_radius - 1.0 });

        let intent = InputIntent::holding(Some(body.id));
        let mut last = body.inner_radius - 1.0;
        let mut ejected = false;
        for _ in 0..2000 {
            match step_ship(&mut ship, std::slice::from_ref(&body), &intent, 5.5) {
                ShipStep::Orbiting => {
                    let r = ship.orbit.map(|o| o.radius).unwrap_or(f32::NAN);
                    prop_assert!(r > last);
                    prop_assert!(r <= body.mid_radius);
                    last = r;
                }
                ShipStep::Ejected => {
                    ejected = true;
                    break;
                }
                other => {
                    prop_assert!(false, "unexpected step {:?}", other);
                }
            }
        }
        prop_assert!(ejected);
        prop_assert!(ship.orbit.is_none());
        prop_assert!(ship.pos.distance(body.pos) > body.mid_radius - 1e-3);
    }

    #[test]
    fn session_scores_rise_and_end_once(
        seed in any::<u64>(),
        presses in prop::collection::vec((any::<bool>(), 0.0f32..750.0, 0.0f32..1334.0), 1..200),
    ) {
        let viewport = Viewport::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT);
        let mut session = Session::new(ManualTicks::new());
        let mut rec = Recorder::default();
        session.start(&GameSettings::default(), seed);

        // Each entry is held for a stretch of frames
        'outer: for (press, x, y) in &presses {
            if *press {
                session.hold_start(*x, *y, &viewport);
            } else {
                session.hold_end();
            }
            for _ in 0..20 {
                if !session.ticks_mut().fire() {
                    break 'outer;
                }
                session.on_tick(&mut rec);
            }
        }
        // Extra ticks never produce events after the run ends
        for _ in 0..3 {
            session.on_tick(&mut rec);
        }

        prop_assert!(rec.scores.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(rec.game_overs.len() <= 1);
        prop_assert_eq!(rec.after_game_over, 0);
        if let (Some(last), Some(final_score)) = (rec.scores.last(), rec.game_overs.first()) {
            prop_assert!(final_score >= last);
        }
        if rec.game_overs.is_empty() {
            prop_assert!(session.is_playing());
            prop_assert!(session.ticks().is_scheduled());
        } else {
            prop_assert!(!session.is_playing());
            prop_assert!(!session.ticks().is_scheduled());
        }
    }
}
