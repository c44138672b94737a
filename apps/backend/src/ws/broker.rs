//! Authoritative room state and move relay.
//!
//! The broker owns every room's deck, hands, and session, so no client can
//! see or forge more than its own projection. Each method returns an
//! outbox of `(connection, message)` pairs; delivering them is the
//! transport's job. That split keeps the broker transport-agnostic and
//! lets tests assert on exactly what each peer would receive.
//!
//! Rooms are independent: the map is sharded and each room carries its own
//! lock, so distinct rooms proceed fully in parallel. Within a room, turn
//! ownership is checked against the authoritative table, which serializes
//! all mutation.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;
use uuid::Uuid;

use super::protocol::{OpponentMoveView, ServerMsg, WireMove};
use crate::domain::state::SEATS;
use crate::domain::turns::{apply_drop, apply_draw};
use crate::domain::{other_seat, view_for, GameTable, Seat};
use crate::error::AppError;
use crate::utils::join_code::{generate_room_code, normalize_room_code};

/// Messages to deliver, keyed by connection id.
pub type Outbox = Vec<(Uuid, ServerMsg)>;

struct Room {
    id: String,
    seats: [Option<Uuid>; SEATS],
    table: Option<GameTable>,
    wins: [u32; SEATS],
}

impl Room {
    fn new(id: String, creator: Uuid) -> Self {
        Self {
            id,
            seats: [Some(creator), None],
            table: None,
            wins: [0; SEATS],
        }
    }

    fn seat_of(&self, conn: Uuid) -> Option<Seat> {
        self.seats
            .iter()
            .position(|s| *s == Some(conn))
            .map(|i| i as Seat)
    }

    fn is_full(&self) -> bool {
        self.seats.iter().all(Option::is_some)
    }

    /// Deal a fresh table and build each seat's concealed opening view.
    fn start_game(&mut self, rematch: bool) -> Outbox {
        let table = GameTable::deal(rand::random());
        let mut out = Vec::new();
        for seat in 0..SEATS as Seat {
            let Some(conn) = self.seats[seat as usize] else {
                continue;
            };
            let view = view_for(&table, seat);
            out.push((
                conn,
                ServerMsg::GameStart {
                    room_id: self.id.clone(),
                    hand: view.hand,
                    top_card: view.top_card,
                    opponent_count: view.opponent_count,
                    deck_count: view.deck_count,
                    you_are_first: view.your_turn,
                    your_wins: self.wins[seat as usize],
                    opponent_wins: self.wins[other_seat(seat) as usize],
                    rematch,
                },
            ));
        }
        self.table = Some(table);
        out
    }
}

#[derive(Default)]
pub struct RoomBroker {
    rooms: DashMap<String, Mutex<Room>>,
}

impl RoomBroker {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Open a room with the caller at seat 0.
    pub fn create_room(&self, conn: Uuid) -> Result<Outbox, AppError> {
        // Collisions on the code space are unlikely; retry a few times
        // rather than loop forever on a pathological RNG.
        for _ in 0..8 {
            let code = generate_room_code();
            match self.rooms.entry(code.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    slot.insert(Mutex::new(Room::new(code.clone(), conn)));
                    info!(room_id = %code, "room created");
                    return Ok(vec![(conn, ServerMsg::RoomCreated { room_id: code })]);
                }
            }
        }
        Err(AppError::internal("could not allocate a unique room id"))
    }

    /// Take the empty seat; a full pair starts the game.
    pub fn join_room(&self, conn: Uuid, raw_id: &str) -> Result<Outbox, AppError> {
        let room_id = normalize_room_code(raw_id);
        let entry = self
            .rooms
            .get(&room_id)
            .ok_or_else(|| AppError::room_not_found(&room_id))?;
        let mut room = entry.lock();

        if room.seat_of(conn).is_some() {
            // Joining a room twice is a no-op.
            return Ok(Vec::new());
        }
        let Some(slot) = room.seats.iter().position(Option::is_none) else {
            return Err(AppError::room_full(room_id));
        };
        room.seats[slot] = Some(conn);
        info!(room_id = %room.id, seat = slot, "participant joined");

        let mut out = vec![(
            conn,
            ServerMsg::RoomJoined {
                room_id: room.id.clone(),
            },
        )];
        if room.is_full() {
            out.extend(room.start_game(false));
        }
        Ok(out)
    }

    /// Validate a move against the authoritative session and relay it.
    ///
    /// The turn owner is taken from the table, never from the client. An
    /// accepted drop is public and goes to the opponent in full; an
    /// accepted draw hands the card identities to the drawer alone and the
    /// opponent learns only the count.
    pub fn submit_move(
        &self,
        conn: Uuid,
        raw_id: &str,
        mv: WireMove,
    ) -> Result<Outbox, AppError> {
        let room_id = normalize_room_code(raw_id);
        let entry = self
            .rooms
            .get(&room_id)
            .ok_or_else(|| AppError::room_not_found(&room_id))?;
        let mut room = entry.lock();
        let seat = room
            .seat_of(conn)
            .ok_or_else(|| AppError::bad_request("not a participant of this room"))?;
        let opponent_conn = room.seats[other_seat(seat) as usize];

        match mv {
            WireMove::Drop { cards } => {
                let outcome = {
                    let table = room
                        .table
                        .as_mut()
                        .ok_or_else(|| AppError::bad_request("game has not started"))?;
                    apply_drop(table, seat, &cards)?
                };
                if outcome.finished {
                    room.wins[seat as usize] += 1;
                }

                let mut out = vec![(
                    conn,
                    ServerMsg::MoveAccepted {
                        drawn: None,
                        finished: outcome.finished,
                    },
                )];
                if let Some(opp) = opponent_conn {
                    out.push((
                        opp,
                        ServerMsg::OpponentMove {
                            mv: OpponentMoveView::Drop {
                                cards,
                                finished: outcome.finished,
                            },
                        },
                    ));
                }
                if outcome.finished {
                    info!(room_id = %room.id, winner = seat, "game finished");
                    let winner_wins = room.wins[seat as usize];
                    let loser_wins = room.wins[other_seat(seat) as usize];
                    out.push((
                        conn,
                        ServerMsg::GameFinished {
                            you_won: true,
                            your_wins: winner_wins,
                            opponent_wins: loser_wins,
                        },
                    ));
                    if let Some(opp) = opponent_conn {
                        out.push((
                            opp,
                            ServerMsg::GameFinished {
                                you_won: false,
                                your_wins: loser_wins,
                                opponent_wins: winner_wins,
                            },
                        ));
                    }
                }
                Ok(out)
            }

            WireMove::Draw { count } => {
                let outcome = {
                    let table = room
                        .table
                        .as_mut()
                        .ok_or_else(|| AppError::bad_request("game has not started"))?;
                    apply_draw(table, seat, count)?
                };
                let drawn_count = outcome.cards.len() as u8;

                let mut out = vec![(
                    conn,
                    ServerMsg::MoveAccepted {
                        drawn: Some(outcome.cards),
                        finished: false,
                    },
                )];
                if let Some(opp) = opponent_conn {
                    out.push((
                        opp,
                        ServerMsg::OpponentMove {
                            mv: OpponentMoveView::Draw { count: drawn_count },
                        },
                    ));
                }
                Ok(out)
            }
        }
    }

    /// Re-deal the same pair. Allowed at any point once the room is full,
    /// matching the original's restart button.
    pub fn rematch(&self, conn: Uuid, raw_id: &str) -> Result<Outbox, AppError> {
        let room_id = normalize_room_code(raw_id);
        let entry = self
            .rooms
            .get(&room_id)
            .ok_or_else(|| AppError::room_not_found(&room_id))?;
        let mut room = entry.lock();
        if room.seat_of(conn).is_none() {
            return Err(AppError::bad_request("not a participant of this room"));
        }
        if !room.is_full() {
            return Err(AppError::bad_request("room has no opponent yet"));
        }
        info!(room_id = %room.id, "rematch");
        Ok(room.start_game(true))
    }

    /// A participant dropped: notify the peer and tear the room down. There
    /// is no resume.
    pub fn disconnect(&self, conn: Uuid) -> Outbox {
        let mut found: Option<(String, Option<Uuid>)> = None;
        for entry in self.rooms.iter() {
            let room = entry.value().lock();
            if let Some(seat) = room.seat_of(conn) {
                found = Some((room.id.clone(), room.seats[other_seat(seat) as usize]));
                break;
            }
        }
        let Some((room_id, peer)) = found else {
            return Vec::new();
        };
        self.rooms.remove(&room_id);
        info!(%room_id, "room torn down after disconnect");
        match peer {
            Some(peer) => vec![(peer, ServerMsg::OpponentLeft)],
            None => Vec::new(),
        }
    }
}
