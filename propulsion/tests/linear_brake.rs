use propulsion::{vehiclespecs, SimpleBody, Vec3f};

const DT: f32 = 1.0 / 60.0;

#[test]
fn crawl_snaps_to_rest_in_one_tick() {
    let spec = vehiclespecs::courier_spec();
    let mut c = spec.coordinator();
    c.set_linear_braking(true);
    let mut body = spec.body().with_velocity(Vec3f::new(4e-4, -3e-4, 0.0));
    c.tick(Some(&mut body), DT);
    assert_eq!(body.velocity, Vec3f::ZERO, "sub-threshold drift should be zeroed outright");
    assert_eq!(c.linear_thrust_vector(), Vec3f::ZERO);
    assert_eq!(body.pending_force(), Vec3f::ZERO);
}

#[test]
fn brake_opposes_horizontal_drift_only() {
    let spec = vehiclespecs::courier_spec();
    let mut c = spec.coordinator();
    c.set_linear_braking(true);
    let mut body = spec.body().with_velocity(Vec3f::new(0.0, 3.0, -2.0));
    c.tick(Some(&mut body), DT);
    let f = c.linear_thrust_vector();
    assert!(f.y < 0.0, "brake should push against +Y drift (got {f:?})");
    assert!(f.x.abs() < 1e-2 && f.z.abs() < 1e-2, "no brake force off the horizontal drift axis (got {f:?})");
}

#[test]
fn thrust_then_brake_comes_to_rest() {
    let spec = vehiclespecs::courier_spec();
    let mut c = spec.coordinator();
    let mut body = spec.body();
    c.set_linear_braking(true);

    c.tick_linear_thrust(Vec3f::X);
    for _ in 0..120 {
        c.tick(Some(&mut body), DT);
        body.step(DT);
    }
    let cruise = body.velocity.x;
    assert!(cruise > 15.0, "two seconds of full thrust should build speed (v={cruise})");
    assert!(!c.thrusters().telemetry().linear_brake_engaged, "thrust wins over the brake");
    assert!(c.linear_thrust_vector().x > 0.0);

    c.end_linear_thrust();
    let mut stopped_at = None;
    for tick in 0..1_500 {
        c.tick(Some(&mut body), DT);
        body.step(DT);
        if body.velocity == Vec3f::ZERO {
            stopped_at = Some(tick);
            break;
        }
        assert!(body.velocity.x > 0.0, "brake must not reverse the vehicle (tick {tick}, v={:?})", body.velocity);
    }
    assert!(stopped_at.is_some(), "vehicle should be snapped to rest (v={:?})", body.velocity);
    assert!(body.position.x > 0.0);
}

#[test]
fn frozen_body_gets_nothing() {
    let spec = vehiclespecs::courier_spec();
    let mut c = spec.coordinator();
    c.set_linear_braking(true);
    let mut body: SimpleBody = spec.body().with_velocity(Vec3f::new(5.0, 0.0, 0.0));
    body.simulating = false;
    c.tick(Some(&mut body), DT);
    assert_eq!(body.velocity, Vec3f::new(5.0, 0.0, 0.0));
    assert_eq!(body.pending_force(), Vec3f::ZERO);
    assert!(!c.thrusters().telemetry().linear_brake_engaged);
}
