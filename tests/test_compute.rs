use std::f32::consts::FRAC_PI_2;

use typing_shooter::compute::*;
use typing_shooter::config::Rules;
use typing_shooter::entities::*;
use typing_shooter::words::WordBank;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> EntireGameStateInfo {
    EntireGameStateInfo {
        player: Player { x: 400.0, y: 750.0 },
        enemies: Vec::new(),
        lasers: Vec::new(),
        locked: None,
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        next_enemy_id: 0,
        rules: Rules::default(),
    }
}

fn with_enemy(mut s: EntireGameStateInfo, word: &str, x: f32, y: f32) -> EntireGameStateInfo {
    let id = EnemyId(s.next_enemy_id);
    s.next_enemy_id += 1;
    s.enemies.push(Enemy::new(id, word, x, y, &s.player, s.rules.enemy_speed));
    s
}

fn bank() -> WordBank {
    WordBank::from_words(["alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf"])
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn keys(keys: &[Key]) -> FrameInput {
    FrameInput { keys: keys.to_vec(), ..FrameInput::default() }
}

// ── init_state / restart ──────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = init_state(Rules::default(), &bank(), &mut seeded_rng());
    assert_eq!(s.player.x, 400.0); // width / 2
    assert_eq!(s.player.y, 750.0); // height - 50
}

#[test]
fn init_state_runs_one_spawn_wave() {
    let s = init_state(Rules::default(), &bank(), &mut seeded_rng());
    assert!(!s.enemies.is_empty());
    assert!(s.enemies.len() <= 5);
    assert!(s.lasers.is_empty());
    assert_eq!(s.locked, None);
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.next_enemy_id, s.enemies.len() as u64);
}

#[test]
fn restart_resets_everything_but_ids() {
    let mut s = with_enemy(make_state(), "alpha", 100.0, 100.0);
    s.score = 120;
    s.player.x = 30.0;
    s.locked = Some(EnemyId(0));
    s.status = GameStatus::GameOver;
    s.lasers.push(Laser::new(30.0, 750.0, &s.enemies[0], 10.0));

    let s2 = restart(&s, &bank(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.player.x, 400.0);
    assert_eq!(s2.locked, None);
    assert!(s2.lasers.is_empty());
    assert!(!s2.enemies.is_empty());
    assert!(s2.enemies.iter().all(|e| e.id.0 >= 1));
}

// ── Player movement ───────────────────────────────────────────────────────────

#[test]
fn move_left_normal() {
    let s = make_state();
    assert_eq!(move_player_left(&s).player.x, 395.0);
}

#[test]
fn move_left_clamps_at_boundary() {
    let mut s = make_state();
    s.player.x = 22.0;
    assert_eq!(move_player_left(&s).player.x, 20.0);
}

#[test]
fn move_right_normal() {
    let s = make_state();
    assert_eq!(move_player_right(&s).player.x, 405.0);
}

#[test]
fn move_right_clamps_at_boundary() {
    let mut s = make_state();
    s.player.x = 779.0;
    assert_eq!(move_player_right(&s).player.x, 780.0);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _s2 = move_player_left(&s);
    let _s3 = move_player_right(&s);
    assert_eq!(s.player.x, 400.0);
}

#[test]
fn tick_applies_held_direction() {
    let s = with_enemy(make_state(), "alpha", 100.0, -200.0);
    let input = FrameInput { left: true, ..FrameInput::default() };
    let s2 = tick(&s, &input, &bank(), &mut seeded_rng());
    assert_eq!(s2.player.x, 395.0);
}

// ── Per-frame simulation ──────────────────────────────────────────────────────

#[test]
fn tick_advances_frame_and_enemies() {
    let s = with_enemy(make_state(), "alpha", 400.0, 0.0);
    let s2 = tick(&s, &FrameInput::default(), &bank(), &mut seeded_rng());
    assert_eq!(s2.frame, 1);
    assert_eq!(s2.enemies.len(), 1);
    assert!((s2.enemies[0].y - 1.5).abs() < 1e-3);
}

#[test]
fn tick_refills_an_empty_arena() {
    let small = WordBank::from_words(["one", "two", "three"]);
    let s = make_state();
    let s2 = tick(&s, &FrameInput::default(), &small, &mut seeded_rng());
    assert!(!s2.enemies.is_empty());
    assert!(s2.enemies.len() <= 3);
}

#[test]
fn tick_does_not_refill_a_populated_arena() {
    let s = with_enemy(make_state(), "alpha", 400.0, 0.0);
    let s2 = tick(&s, &FrameInput::default(), &bank(), &mut seeded_rng());
    assert_eq!(s2.enemies.len(), 1);
}

#[test]
fn typed_keys_flow_through_tick() {
    let s = with_enemy(make_state(), "cat", 400.0, 100.0);
    let s = with_enemy(s, "dog", 200.0, 50.0);
    let s2 = tick(&s, &keys(&[Key::Char('c'), Key::Char('a')]), &bank(), &mut seeded_rng());
    assert_eq!(s2.locked, Some(EnemyId(0)));
    assert_eq!(s2.enemy(EnemyId(0)).unwrap().typed_part(), "ca");
    assert_eq!(s2.lasers.len(), 2);
}

#[test]
fn killing_shot_lasers_retire_once_target_is_gone() {
    let s = with_enemy(make_state(), "cat", 400.0, 100.0);
    let s2 = tick(
        &s,
        &keys(&[Key::Char('c'), Key::Char('a'), Key::Char('t')]),
        &bank(),
        &mut seeded_rng(),
    );
    assert_eq!(s2.score, 30);
    assert_eq!(s2.locked, None);
    assert!(s2.enemy(EnemyId(0)).is_none());
    assert!(s2.lasers.is_empty());
    // Arena was emptied by the kill, so the same frame refills it
    assert!(!s2.enemies.is_empty());
}

#[test]
fn laser_retires_on_hit() {
    let s = with_enemy(make_state(), "cat", 400.0, 600.0);
    let mut s = tick(&s, &keys(&[Key::Char('c')]), &bank(), &mut seeded_rng());
    assert_eq!(s.lasers.len(), 1);

    for _ in 0..30 {
        if s.lasers.is_empty() {
            break;
        }
        s = tick(&s, &FrameInput::default(), &bank(), &mut seeded_rng());
    }
    assert!(s.lasers.is_empty());
    // Hitting does not kill; only typing does
    assert!(s.enemy(EnemyId(0)).is_some());
}

#[test]
fn enemy_reaching_player_ends_the_game_and_stops_the_frame() {
    let s = with_enemy(make_state(), "alpha", 400.0, 745.0);
    let s = with_enemy(s, "bravo", 100.0, 100.0);
    let s2 = tick(&s, &FrameInput::default(), &bank(), &mut seeded_rng());

    assert_eq!(s2.status, GameStatus::GameOver);
    // The second enemy was never updated this frame
    let bravo = s2.enemy(EnemyId(1)).unwrap();
    assert_eq!((bravo.x, bravo.y), (100.0, 100.0));
}

#[test]
fn enemy_past_the_field_is_culled_and_unlocked() {
    let mut s = with_enemy(make_state(), "alpha", 400.0, 900.0);
    s = with_enemy(s, "bravo", 100.0, -200.0);
    s.enemies[0].heading = FRAC_PI_2;
    s.enemies[0].typed = 1;
    s.locked = Some(EnemyId(0));

    let s2 = tick(&s, &FrameInput::default(), &bank(), &mut seeded_rng());
    assert!(s2.enemy(EnemyId(0)).is_none());
    assert_eq!(s2.locked, None);
    assert!(s2.enemy(EnemyId(1)).is_some());
    assert_eq!(s2.score, 0);
}

// ── State transitions ─────────────────────────────────────────────────────────

#[test]
fn escape_pauses_and_drops_the_rest_of_the_frame() {
    let s = with_enemy(make_state(), "cat", 400.0, 100.0);
    let s2 = tick(&s, &keys(&[Key::Escape, Key::Char('c')]), &bank(), &mut seeded_rng());

    assert_eq!(s2.status, GameStatus::Paused);
    assert_eq!(s2.locked, None);
    assert_eq!(s2.enemies, s.enemies);
}

#[test]
fn paused_game_does_not_simulate() {
    let mut s = with_enemy(make_state(), "cat", 400.0, 100.0);
    s.status = GameStatus::Paused;
    let input = FrameInput { left: true, keys: vec![Key::Char('c')], ..FrameInput::default() };
    let s2 = tick(&s, &input, &bank(), &mut seeded_rng());

    assert_eq!(s2.status, GameStatus::Paused);
    assert_eq!(s2.enemies, s.enemies);
    assert_eq!(s2.player, s.player);
    assert_eq!(s2.frame, 1);
}

#[test]
fn paused_r_resumes() {
    let mut s = with_enemy(make_state(), "cat", 400.0, 100.0);
    s.status = GameStatus::Paused;
    s.score = 50;
    let s2 = tick(&s, &keys(&[Key::Char('r')]), &bank(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.score, 50);
    assert_eq!(s2.enemies, s.enemies);
}

#[test]
fn paused_enter_restarts() {
    let mut s = with_enemy(make_state(), "cat", 400.0, 100.0);
    s.status = GameStatus::Paused;
    s.score = 50;
    let s2 = tick(&s, &keys(&[Key::Enter]), &bank(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.score, 0);
    assert!(s2.enemy(EnemyId(0)).is_none());
}

#[test]
fn paused_q_terminates() {
    let mut s = make_state();
    s.status = GameStatus::Paused;
    let s2 = tick(&s, &keys(&[Key::Char('q')]), &bank(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Terminated);
}

#[test]
fn game_over_enter_restarts() {
    let mut s = with_enemy(make_state(), "cat", 400.0, 745.0);
    s.status = GameStatus::GameOver;
    s.score = 70;
    let s2 = tick(&s, &keys(&[Key::Enter]), &bank(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.score, 0);
}

#[test]
fn game_over_ignores_resume_and_typing() {
    let mut s = with_enemy(make_state(), "cat", 400.0, 745.0);
    s.status = GameStatus::GameOver;
    let s2 = tick(&s, &keys(&[Key::Char('r'), Key::Char('c')]), &bank(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.enemies, s.enemies);
}

#[test]
fn game_over_q_terminates() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    let s2 = tick(&s, &keys(&[Key::Char('Q')]), &bank(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Terminated);
}

#[test]
fn q_while_playing_is_just_a_letter() {
    let s = with_enemy(make_state(), "quit", 400.0, 100.0);
    let s2 = tick(&s, &keys(&[Key::Char('q')]), &bank(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.locked, Some(EnemyId(0)));
}

#[test]
fn interrupt_terminates_from_any_state() {
    for status in [GameStatus::Playing, GameStatus::Paused, GameStatus::GameOver] {
        let mut s = make_state();
        s.status = status;
        let s2 = tick(&s, &keys(&[Key::Interrupt]), &bank(), &mut seeded_rng());
        assert_eq!(s2.status, GameStatus::Terminated);
    }
}

#[test]
fn terminated_state_is_final() {
    let mut s = make_state();
    s.status = GameStatus::Terminated;
    let s2 = tick(&s, &keys(&[Key::Enter, Key::Char('r')]), &bank(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Terminated);
    assert!(s2.enemies.is_empty());
}

#[test]
fn pause_and_resume_only_apply_from_their_source_state() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    assert_eq!(pause(&s).status, GameStatus::GameOver);
    assert_eq!(resume(&s).status, GameStatus::GameOver);

    let playing = make_state();
    assert_eq!(resume(&playing).status, GameStatus::Playing);
    assert_eq!(resume(&pause(&playing)).status, GameStatus::Playing);
}
