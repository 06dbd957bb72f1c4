use propulsion::{
    ControlTuning, DirectionalMultiplierTable, ForceUnit, PropulsionCoordinator, RocketSpec, SimpleBody,
    ThrusterSpec, Vec3f,
};

const DT: f32 = 1.0 / 60.0;

fn coordinator(tuning: ControlTuning) -> PropulsionCoordinator {
    // 1 kN·m = 1000 N·m of yaw torque, π/2 rad/s ceiling.
    PropulsionCoordinator::new(
        ThrusterSpec {
            linear_thrust_kn: 0.0,
            torque_knm: 1.0,
            max_angular_speed_deg: 90.0,
            thrust_multiplier: DirectionalMultiplierTable::EMPTY,
            boost_multiplier: DirectionalMultiplierTable::EMPTY,
        },
        RocketSpec { linear_thrust_kn: 0.0, boost_multiplier: DirectionalMultiplierTable::EMPTY },
        tuning,
    )
}

#[test]
fn full_command_at_ceiling_gives_zero_torque() {
    let mut c = coordinator(ControlTuning::default());
    let max = c.thrusters().spec().max_angular_speed_rad();
    let mut body = SimpleBody::new(100.0, Vec3f::splat(10.0)).with_yaw_rate(max);
    c.tick_angular_thrust(Vec3f::new(1.0, 0.0, 0.0));
    c.tick(Some(&mut body), DT);
    assert_eq!(c.yaw_torque(), 0.0, "already at the ceiling, no more torque");
}

#[test]
fn spin_up_never_passes_ceiling() {
    let mut c = coordinator(ControlTuning::default());
    let max = c.thrusters().spec().max_angular_speed_rad();
    let mut body = SimpleBody::new(100.0, Vec3f::splat(10.0));
    c.tick_angular_thrust(Vec3f::new(1.0, 0.0, 0.0));
    for tick in 0..240 {
        c.tick(Some(&mut body), DT);
        body.step(DT);
        assert!(
            body.yaw_rate() <= max + 1e-4,
            "yaw rate {} passed the {max} ceiling at tick {tick}",
            body.yaw_rate()
        );
    }
    assert!((body.yaw_rate() - max).abs() < 1e-3, "should cruise at the ceiling (rate {})", body.yaw_rate());
}

#[test]
fn reversing_at_ceiling_gets_full_torque() {
    let mut c = coordinator(ControlTuning::default());
    let max = c.thrusters().spec().max_angular_speed_rad();
    let mut body = SimpleBody::new(100.0, Vec3f::splat(10.0)).with_yaw_rate(max);
    c.tick_angular_thrust(Vec3f::new(-1.0, 0.0, 0.0));
    c.tick(Some(&mut body), DT);
    assert_eq!(c.yaw_torque(), -1_000.0);
    assert_eq!(c.yaw_torque_normalized(), -1.0);
}

#[test]
fn centinewton_unit_scales_torque() {
    let tuning = ControlTuning { force_unit: ForceUnit::Centinewton, ..ControlTuning::default() };
    let mut c = coordinator(tuning);
    // Same vehicle measured in centimetres (kg·cm²).
    let mut body = SimpleBody::new(100.0, Vec3f::splat(10.0 * 100.0 * 100.0));
    c.tick_angular_thrust(Vec3f::new(0.25, 0.0, 0.0));
    c.tick(Some(&mut body), DT);
    assert!((c.yaw_torque() - 25_000.0).abs() < 1e-1, "got {}", c.yaw_torque());
}
