use marbles_core::*;

fn dealt(seed: u64) -> Game {
    let mut game = Game::new(GameConfig::default());
    game.new_game(Seed::new(seed), &mut Headless).unwrap();
    game
}

fn first_region(game: &Game, matches: impl Fn(usize) -> bool) -> Option<Coord2> {
    let grid = game.grid();
    grid.dims()
        .iter_coords()
        .find(|&coords| !grid[coords].is_empty() && matches(find_region(grid, coords).len()))
}

/// Plays the first available region until the game stops, returning the number of clears.
fn play_out(game: &mut Game) -> usize {
    let mut clears = 0;
    while game.session().is_running() {
        let coords = first_region(game, |size| size > 1).expect("running game has a move");
        assert!(matches!(game.click(coords, &mut Headless), Ok(ClickOutcome::Selected { .. })));
        assert!(matches!(game.click(coords, &mut Headless), Ok(ClickOutcome::Cleared { .. })));
        game.settle(&mut Headless);
        assert!(is_settled(game.grid()));
        clears += 1;
    }
    clears
}

#[test]
fn default_deal_is_full_and_reproducible() {
    let a = dealt(1);
    let b = dealt(1);

    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.grid().side(), DEFAULT_SIDE);
    assert!(a.grid().iter().all(|(_, cell)| {
        matches!(cell.color_of(), Some(color) if color < DEFAULT_COLORS) && !cell.is_selected()
    }));
    assert_eq!(a.state(), RoundState::Idle);
    assert_ne!(dealt(2).grid(), a.grid());
}

#[test]
fn select_then_clear_scores_and_settles() {
    let mut game = dealt(0x5eed);
    let coords = first_region(&game, |size| size > 1).unwrap();
    let size = find_region(game.grid(), coords).len();

    let selected = game.click(coords, &mut Headless).unwrap();
    assert_eq!(
        selected,
        ClickOutcome::Selected {
            size,
            potential: score_for(size)
        }
    );
    assert_eq!(game.snapshot().selection_size, size);

    let cleared = game.click(coords, &mut Headless).unwrap();
    assert_eq!(
        cleared,
        ClickOutcome::Cleared {
            size,
            points: score_for(size)
        }
    );
    assert_eq!(game.state(), RoundState::Locked);

    let empty_before = game.grid().iter().filter(|(_, cell)| cell.is_empty()).count();
    assert_eq!(empty_before, size);
    game.settle(&mut Headless);
    let empty_after = game.grid().iter().filter(|(_, cell)| cell.is_empty()).count();

    assert_eq!(empty_after, size);
    assert!(is_settled(game.grid()));
    assert_eq!(game.session().score(), score_for(size));
    assert_eq!(game.state(), RoundState::Idle);
}

#[test]
fn lone_cell_click_changes_nothing() {
    // a 10x10 board in four colors practically always has a lone cell
    let (mut game, coords) = (1..100)
        .map(dealt)
        .find_map(|game| first_region(&game, |size| size == 1).map(|coords| (game, coords)))
        .unwrap();
    let before = game.grid().clone();

    assert_eq!(game.click(coords, &mut Headless), Ok(ClickOutcome::NoMatch));
    assert_eq!(game.grid(), &before);
    assert_eq!(game.state(), RoundState::Idle);
}

#[test]
fn clicks_are_ignored_while_settling() {
    let mut game = dealt(42);
    let coords = first_region(&game, |size| size > 1).unwrap();
    game.click(coords, &mut Headless).unwrap();
    game.click(coords, &mut Headless).unwrap();

    let mut steps = 0;
    while game.is_settling() {
        assert_eq!(game.click((0, 0), &mut Headless), Ok(ClickOutcome::Ignored));
        game.step(&mut Headless);
        steps += 1;
    }

    assert!(steps > 0);
    assert_eq!(game.state(), RoundState::Idle);
}

#[test]
fn greedy_play_ends_in_a_win_or_a_stuck_board() {
    for seed in 1..=5 {
        let mut game = dealt(seed);

        let clears = play_out(&mut game);

        assert!(clears > 0);
        assert!(!game.can_move());
        assert_eq!(game.click((0, 0), &mut Headless), Err(GameError::NotRunning));
        let snapshot = game.snapshot();
        assert_eq!(snapshot.has_won, game.grid()[(0, DEFAULT_SIDE - 1)].is_empty());
        assert!(snapshot.score > 0);
    }
}

#[test]
fn two_color_board_with_matching_halves_can_be_won() {
    #[rustfmt::skip]
    let grid = Grid::from_colors(3, &[
        Some(0), Some(0), Some(1),
        Some(0), Some(1), Some(1),
        Some(0), Some(1), Some(1),
    ])
    .unwrap();
    let mut game = Game::from_grid(grid, Seed::default());

    game.click((2, 2), &mut Headless).unwrap();
    assert_eq!(
        game.click((2, 2), &mut Headless),
        Ok(ClickOutcome::Cleared { size: 5, points: 50 })
    );
    game.settle(&mut Headless);
    assert!(game.session().is_running());

    game.click((0, 2), &mut Headless).unwrap();
    game.click((0, 2), &mut Headless).unwrap();
    game.settle(&mut Headless);

    assert!(game.has_won());
    assert!(game.grid().is_cleared());
    assert!(!game.session().is_running());
    assert_eq!(game.session().score(), 50 + 36);
}

#[test]
fn clearing_a_region_of_four_scores_36() {
    let (mut game, coords) = (1..500)
        .map(dealt)
        .find_map(|game| first_region(&game, |size| size == 4).map(|coords| (game, coords)))
        .unwrap();
    let region = find_region(game.grid(), coords);

    game.click(coords, &mut Headless).unwrap();
    assert!(region.iter().all(|&index| game.grid()[index].is_selected()));
    assert_eq!(
        game.click(coords, &mut Headless),
        Ok(ClickOutcome::Cleared { size: 4, points: 36 })
    );
    assert!(region.iter().all(|&index| game.grid()[index].is_empty()));
    game.settle(&mut Headless);

    assert_eq!(game.session().score(), 36);
    assert!(is_settled(game.grid()));
    assert_eq!(game.grid().iter().filter(|(_, cell)| cell.is_empty()).count(), 4);
}
