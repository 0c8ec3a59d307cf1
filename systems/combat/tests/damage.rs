use rstest::rstest;
use skirmish_system_combat::{raw_damage, DamageRoller, ATTACK_ROLL, DEFENCE_ROLL, FLOOR_ROLL};

#[rstest]
#[case(0, 0)]
#[case(0, 50)]
#[case(1, 30)]
#[case(3, 3)]
#[case(10, 2)]
#[case(250, 1)]
fn every_hit_deals_at_least_one(#[case] atk: u32, #[case] def: u32) {
    let mut roller = DamageRoller::new(0xdead_beef);
    for _ in 0..500 {
        assert!(roller.roll(atk, def) >= 1);
    }
}

#[test]
fn overwhelming_defence_falls_back_to_floor_roll() {
    let mut roller = DamageRoller::new(11);
    for _ in 0..500 {
        let damage = roller.roll(1, 1_000);
        assert!(FLOOR_ROLL.contains(&damage), "damage {damage} outside floor");
    }
}

#[test]
fn reference_duel_damage_stays_within_formula_bounds() {
    let minimum = raw_damage(10, 2, *ATTACK_ROLL.start(), *DEFENCE_ROLL.end());
    let maximum = raw_damage(10, 2, *ATTACK_ROLL.end(), *DEFENCE_ROLL.start());
    assert_eq!((minimum, maximum), (44, 98));

    let mut roller = DamageRoller::new(0x5eed);
    for _ in 0..500 {
        let damage = i64::from(roller.roll(10, 2));
        assert!(
            (minimum..=maximum).contains(&damage),
            "damage {damage} outside [{minimum}, {maximum}]"
        );
    }
}

#[test]
fn identical_seeds_replay_identical_rolls() {
    let mut first = DamageRoller::new(42);
    let mut second = DamageRoller::new(42);
    let left: Vec<u32> = (0..64).map(|_| first.roll(7, 4)).collect();
    let right: Vec<u32> = (0..64).map(|_| second.roll(7, 4)).collect();
    assert_eq!(left, right);
}
