//! Entity motion and paddle contact
//!
//! Entities fall straight down at the speed they were spawned with. Anything
//! touching the paddle is consumed and reported as a [`Contact`]; anything
//! whose leading edge drops past the bottom of the world is discarded.

use super::collision::circle_rect_overlap;
use super::state::Session;

/// An entity the paddle caught this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Droplet { id: u32, rewarding: bool },
    Hazard { id: u32 },
}

/// Move every droplet one tick and collect the ones that hit the paddle.
///
/// Contacts are reported newest entity first.
pub fn advance_droplets(session: &mut Session) -> Vec<Contact> {
    let paddle = session.player.rect();
    let floor = session.tuning.world_height;
    let mut contacts = Vec::new();

    session.droplets.retain_mut(|droplet| {
        droplet.pos.y += droplet.fall_speed;
        if circle_rect_overlap(droplet.pos, droplet.radius, &paddle) {
            contacts.push(Contact::Droplet {
                id: droplet.id,
                rewarding: droplet.rewarding,
            });
            return false;
        }
        droplet.leading_edge() <= floor
    });

    contacts.reverse();
    contacts
}

/// Move every hazard one tick and collect the ones that hit the paddle.
///
/// Contacts are reported newest entity first.
pub fn advance_hazards(session: &mut Session) -> Vec<Contact> {
    let paddle = session.player.rect();
    let floor = session.tuning.world_height;
    let mut contacts = Vec::new();

    session.hazards.retain_mut(|hazard| {
        hazard.pos.y += hazard.fall_speed;
        if circle_rect_overlap(hazard.pos, hazard.collision_radius(), &paddle) {
            contacts.push(Contact::Hazard { id: hazard.id });
            return false;
        }
        hazard.leading_edge() <= floor
    });

    contacts.reverse();
    contacts
}
