use crate::errors::GameError;
use crate::game::Street;
use crate::player::PlayerAction as A;

/// Street-level facts needed to judge an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingContext {
    pub street: Street,
    /// Largest bet in front of any seat on this street
    pub highest_bet: u32,
    pub big_blind: u32,
    /// Whether anyone has raised on this street
    pub raised: bool,
}

/// An action that passed validation, with the chips it will move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips moved from the stack; less than the amount owed when all-in
    Call(u32),
    Raise { to: u32, moved: u32 },
}

/// Smallest legal "raise to" for a seat that already has `actor_bet` out.
///
/// Normally the raise must add at least the gap between the highest bet and
/// the actor's own bet. Preflop, while the big blind is the only bet, the
/// opening raise may equal the big blind. No raise is ever below the big blind.
pub fn min_raise(ctx: &BettingContext, actor_bet: u32) -> u32 {
    if ctx.street == Street::Preflop && ctx.highest_bet == ctx.big_blind && !ctx.raised {
        return ctx.big_blind;
    }
    let gap = ctx.highest_bet.saturating_sub(actor_bet);
    ctx.highest_bet.saturating_add(gap).max(ctx.big_blind)
}

/// Validates a player action for a seat holding `chips` behind and `bet` in
/// front on this street.
///
/// # Errors
///
/// - [`GameError::CannotCheck`] - checking while behind the highest bet
/// - [`GameError::RaiseTooSmall`] - raise below [`min_raise`]
/// - [`GameError::InsufficientChips`] - raise beyond `chips + bet`
///
/// # Examples
///
/// ```
/// use holdem_engine::game::Street;
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::rules::{validate_action, BettingContext, ValidatedAction};
///
/// let ctx = BettingContext { street: Street::Flop, highest_bet: 40, big_blind: 10, raised: true };
/// // Short stack can only call for what it has
/// assert_eq!(validate_action(25, 0, &ctx, PlayerAction::Call), Ok(ValidatedAction::Call(25)));
/// assert!(validate_action(1000, 0, &ctx, PlayerAction::Raise(60)).is_err());
/// ```
pub fn validate_action(
    chips: u32,
    bet: u32,
    ctx: &BettingContext,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let to_call = ctx.highest_bet.saturating_sub(bet);
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck { to_call })
            }
        }
        A::Call => Ok(ValidatedAction::Call(to_call.min(chips))),
        A::Raise(amount) => {
            let minimum = min_raise(ctx, bet);
            if amount < minimum {
                return Err(GameError::RaiseTooSmall { amount, minimum });
            }
            let available = chips.saturating_add(bet);
            if amount > available {
                return Err(GameError::InsufficientChips { amount, available });
            }
            Ok(ValidatedAction::Raise {
                to: amount,
                moved: amount - bet,
            })
        }
    }
}
