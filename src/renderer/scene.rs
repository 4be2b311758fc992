//! Scene drawing: lays out one frame of the match on a [`Canvas`]

use glam::Vec2;

use super::{Align, Canvas, Color, DrawScope, Stroke};
use crate::sim::{MatchState, Owner, Paddle, Rect, RectMode, Side};

pub const BACKGROUND: Color = Color::rgb(175, 203, 255);
pub const LEFT_TEAM: Color = Color::rgb(75, 115, 225);
pub const RIGHT_TEAM: Color = Color::rgb(239, 71, 111);
pub const NEUTRAL_BALL: Color = Color::gray(127);

const HIDE_ALPHA: u8 = 240;
const SCORE_SIZE: f32 = 48.0;
const COUNTDOWN_SIZE: f32 = 40.0;
const BANNER_SIZE: f32 = 64.0;

/// Ball colour for the current owner
pub fn owner_color(owner: Owner) -> Color {
    match owner {
        Owner::Neutral => NEUTRAL_BALL,
        Owner::Left => Color::WHITE.lerp(LEFT_TEAM, 0.8),
        Owner::Right => Color::WHITE.lerp(RIGHT_TEAM, 0.8),
    }
}

pub fn team_color(side: Side) -> Color {
    match side {
        Side::Left => LEFT_TEAM,
        Side::Right => RIGHT_TEAM,
    }
}

/// Draw one frame
pub fn draw_match<C: Canvas + ?Sized>(state: &MatchState, canvas: &mut C) {
    let field = state.field;

    canvas.background(BACKGROUND);
    draw_divider(field, canvas);
    draw_powerup(state, canvas);
    draw_scores(state, canvas);
    draw_ball(state, canvas);
    draw_paddle(&state.left, canvas);
    draw_paddle(&state.right, canvas);

    if state.paused {
        draw_pause(field, canvas);
    }
    if let Some(winner) = state.winner {
        draw_banner(state, winner, canvas);
    }
}

fn draw_divider<C: Canvas + ?Sized>(field: Vec2, canvas: &mut C) {
    let x = field.x / 2.0;
    canvas.line(
        Vec2::new(x, 0.0),
        Vec2::new(x, field.y),
        Stroke {
            color: Color::WHITE,
            weight: 2.0,
        },
    );
}

fn draw_powerup<C: Canvas + ?Sized>(state: &MatchState, canvas: &mut C) {
    let Some(powerup) = state.scheduler.current() else {
        return;
    };
    let field = state.field;
    let tint = owner_color(powerup.tint);

    if let Some(side) = powerup.hidden_side() {
        let mut scope = DrawScope::new(canvas);
        let corner_x = match side {
            Side::Left => 0.0,
            Side::Right => field.x / 2.0,
        };
        let cover = Rect::new(corner_x, 0.0, field.x / 2.0, field.y, RectMode::Corner);
        scope.fill_rect(cover, tint.with_alpha(HIDE_ALPHA), 0.0);
    }

    {
        let mut scope = DrawScope::new(canvas);
        let stroke = Stroke {
            color: Color::WHITE,
            weight: 2.0,
        };
        scope.fill_circle(powerup.pos, powerup.radius, tint, Some(stroke));
        scope.icon(powerup.kind.icon(), powerup.pos, Vec2::splat(powerup.radius * 2.0));
    }

    if powerup.active {
        let mut scope = DrawScope::new(canvas);
        scope.text(
            &powerup.remaining_seconds().to_string(),
            state.scheduler.countdown_pos(),
            COUNTDOWN_SIZE,
            Color::BLACK,
            Align::Center,
        );
    }
}

fn draw_scores<C: Canvas + ?Sized>(state: &MatchState, canvas: &mut C) {
    let field = state.field;
    let positions = [
        Vec2::new(field.x * 9.0 / 20.0, field.y / 10.0),
        Vec2::new(field.x * 11.0 / 20.0, field.y / 10.0),
    ];
    for (score, pos) in state.scores.iter().zip(positions) {
        let mut scope = DrawScope::new(canvas);
        scope.text(&score.to_string(), pos, SCORE_SIZE, Color::WHITE, Align::Center);
    }
}

fn draw_ball<C: Canvas + ?Sized>(state: &MatchState, canvas: &mut C) {
    let ball = &state.ball;
    let mut scope = DrawScope::new(canvas);
    scope.fill_circle(ball.pos, ball.radius, owner_color(ball.owner), None);
}

fn draw_paddle<C: Canvas + ?Sized>(paddle: &Paddle, canvas: &mut C) {
    let mut scope = DrawScope::new(canvas);
    let rect = Rect::centered(paddle.pos, Vec2::new(paddle.width, paddle.height));
    scope.fill_rect(rect, team_color(paddle.side), 0.0);
}

fn draw_pause<C: Canvas + ?Sized>(field: Vec2, canvas: &mut C) {
    let mut scope = DrawScope::new(canvas);
    let size = Vec2::new(field.x * 1.5 / 100.0, field.y * 12.0 / 100.0);
    for x in [field.x * 24.0 / 50.0, field.x * 26.0 / 50.0] {
        let bar = Rect::centered(Vec2::new(x, field.y / 2.0), size);
        scope.fill_rect(bar, Color::WHITE, 20.0);
    }
}

fn draw_banner<C: Canvas + ?Sized>(state: &MatchState, winner: Side, canvas: &mut C) {
    let field = state.field;
    let mut scope = DrawScope::new(canvas);

    let screen = Rect::new(0.0, 0.0, field.x, field.y, RectMode::Corner);
    scope.fill_rect(screen, Color::WHITE.with_alpha(127), 0.0);

    let anchor = Vec2::new(field.x / 2.0, (field.y * 3.0 / 7.0).floor());
    scope.text(
        &format!("Player {} Wins!", winner.number()),
        anchor,
        BANNER_SIZE,
        Color::BLACK,
        Align::Center,
    );

    let points_y = anchor.y + field.y / 10.0;
    let points_dx = field.x / 15.0;
    scope.text(
        &state.scores[0].to_string(),
        Vec2::new(anchor.x - points_dx, points_y),
        BANNER_SIZE,
        Color::BLACK,
        Align::Center,
    );
    scope.text(
        &state.scores[1].to_string(),
        Vec2::new(anchor.x + points_dx, points_y),
        BANNER_SIZE,
        Color::BLACK,
        Align::Center,
    );

    scope.text(
        "Restart with Shift+R",
        Vec2::new(anchor.x, anchor.y + field.y / 4.0),
        BANNER_SIZE / 2.0,
        Color::BLACK,
        Align::Center,
    );
}
