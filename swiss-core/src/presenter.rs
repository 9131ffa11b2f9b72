//! Seam for whoever displays the standings
//!
//! The core never renders. When a tournament ends it hands the final table
//! to a presenter, if one is attached.

use crate::standings::Standing;

pub trait StandingsPresenter {
    /// Show the standings, optionally titled with the tournament name
    fn present(&mut self, name: Option<&str>, standings: &[Standing]);
}

impl<P: StandingsPresenter + ?Sized> StandingsPresenter for Box<P> {
    fn present(&mut self, name: Option<&str>, standings: &[Standing]) {
        (**self).present(name, standings)
    }
}
