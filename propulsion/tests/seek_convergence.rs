use propulsion::thrusters::{seek, SeekBranch, SeekCommand, SeekState};
use propulsion::{
    vehiclespecs, ControlTuning, DirectionalMultiplierTable, PropulsionCoordinator, RocketSpec, SimpleBody,
    ThrusterSpec, Vec3f,
};

const DT: f32 = 1.0 / 60.0;

fn heading(deg: f32) -> Vec3f {
    let r = deg.to_radians();
    Vec3f::new(r.cos(), r.sin(), 0.0)
}

fn wrap_deg(d: f32) -> f32 {
    (d + 180.0).rem_euclid(360.0) - 180.0
}

/// Seek `target_deg` from rest at yaw 0 and return (heading error °, final yaw rate, last branch).
fn run_seek(mut c: PropulsionCoordinator, mut body: SimpleBody, target_deg: f32, ticks: usize) -> (f32, f32, Option<SeekBranch>) {
    c.set_alternate_turning(true);
    c.tick_angular_thrust(heading(target_deg));
    for _ in 0..ticks {
        c.tick(Some(&mut body), DT);
        body.step(DT);
    }
    let err = wrap_deg(body.yaw().to_degrees() - target_deg);
    (err, body.yaw_rate(), c.telemetry().seek_branch)
}

fn unit_vehicle() -> (PropulsionCoordinator, SimpleBody) {
    // 1000 N·m of torque against 10 kg·m².
    let c = PropulsionCoordinator::new(
        ThrusterSpec {
            linear_thrust_kn: 0.0,
            torque_knm: 1.0,
            max_angular_speed_deg: 90.0,
            thrust_multiplier: DirectionalMultiplierTable::EMPTY,
            boost_multiplier: DirectionalMultiplierTable::EMPTY,
        },
        RocketSpec { linear_thrust_kn: 0.0, boost_multiplier: DirectionalMultiplierTable::EMPTY },
        ControlTuning::default(),
    );
    (c, SimpleBody::new(100.0, Vec3f::splat(10.0)))
}

#[test]
fn seek_settles_on_target_without_spin() {
    for target in [10.0_f32, 90.0, 170.0, -45.0, -179.0] {
        let (c, body) = unit_vehicle();
        let (err, rate, branch) = run_seek(c, body, target, 1_800);
        assert!(err.abs() < 0.5, "heading should settle on {target}° (error {err}°)");
        assert_eq!(rate, 0.0, "residual spin should be snapped to zero for {target}° (rate {rate})");
        assert_eq!(branch, Some(SeekBranch::Settle), "seek for {target}° should end settled");
    }
}

#[test]
fn courier_seek_settles() {
    let spec = vehiclespecs::courier_spec();
    for target in [90.0_f32, -90.0, 170.0] {
        let (err, rate, branch) = run_seek(spec.coordinator(), spec.body(), target, 1_200);
        assert!(err.abs() < 0.5, "courier should settle on {target}° (error {err}°)");
        assert_eq!(rate, 0.0);
        assert_eq!(branch, Some(SeekBranch::Settle));
    }
}

#[test]
fn aligned_with_small_residual_spin_snaps() {
    let tuning = ControlTuning::default();
    // seek_gain * I * |w| = 100 * 10 * 5e-4 = 0.5 < 1000 * 1e-3
    let state = SeekState {
        forward: Vec3f::X,
        target: Vec3f::new(1.0, 0.0004, 0.0),
        angular_velocity: 5e-4,
        torque_capacity: 1_000.0,
        inertia: 10.0,
        dt: DT,
    };
    let d = seek(&state, &tuning);
    assert_eq!(d.branch, SeekBranch::Settle);
    assert_eq!(d.command, SeekCommand::Snap);

    let (mut c, _) = unit_vehicle();
    let mut body = SimpleBody::new(100.0, Vec3f::splat(10.0)).with_yaw_rate(5e-4);
    c.set_alternate_turning(true);
    c.tick_angular_thrust(Vec3f::X);
    c.tick(Some(&mut body), DT);
    assert_eq!(body.yaw_rate(), 0.0, "snap should zero the spin exactly");
    assert_eq!(c.yaw_torque(), 0.0);
}

#[test]
fn aligned_with_larger_spin_brakes() {
    // Within one tick of capacity (1000/10/60 ≈ 1.67 rad/s) but well above the snap threshold.
    let state = SeekState {
        forward: Vec3f::X,
        target: Vec3f::X,
        angular_velocity: 0.5,
        torque_capacity: 1_000.0,
        inertia: 10.0,
        dt: DT,
    };
    let d = seek(&state, &ControlTuning::default());
    assert_eq!(d.branch, SeekBranch::Settle);
    assert_eq!(d.command, SeekCommand::Torque(-500.0));
}

#[test]
fn seek_never_exceeds_capacity() {
    let tuning = ControlTuning::default();
    for w in [-8.0_f32, -1.0, -0.01, 0.0, 0.3, 2.0, 12.0] {
        for deg in [0.5_f32, 30.0, 120.0, -60.0, 179.0] {
            let state = SeekState {
                forward: Vec3f::X,
                target: heading(deg),
                angular_velocity: w,
                torque_capacity: 1_000.0,
                inertia: 10.0,
                dt: DT,
            };
            if let SeekCommand::Torque(t) = seek(&state, &tuning).command {
                assert!(t.abs() <= 1_000.0, "torque {t} over capacity for w={w}, target={deg}°");
            }
        }
    }
}

#[test]
fn settled_seek_records_no_angular_thrust() {
    let (mut c, mut body) = unit_vehicle();
    c.set_alternate_turning(true);
    c.tick_angular_thrust(heading(0.0));
    c.tick(Some(&mut body), DT);
    assert_eq!(c.telemetry().seek_branch, Some(SeekBranch::Settle));
    assert!(!c.thrusters().telemetry().angular_thrust_active);

    c.tick_angular_thrust(heading(45.0));
    c.tick(Some(&mut body), DT);
    assert_eq!(c.telemetry().seek_branch, Some(SeekBranch::Start));
    assert!(c.thrusters().telemetry().angular_thrust_active);
}
