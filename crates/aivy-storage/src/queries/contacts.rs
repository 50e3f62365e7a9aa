// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead contact operations. One contact per session, upserted.

use aivy_core::AivyError;
use aivy_core::types::{ContactId, LeadContact};
use rusqlite::params;

use crate::database::Database;

fn row_to_contact(row: &rusqlite::Row) -> Result<LeadContact, rusqlite::Error> {
    Ok(LeadContact {
        id: row.get(0)?,
        session_id: row.get(1)?,
        name: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        organization: row.get(5)?,
        role: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

const CONTACT_COLUMNS: &str =
    "id, session_id, name, phone, email, organization, role, created_at, updated_at";

/// Insert or refresh the session's lead contact.
///
/// The UNIQUE constraint on `session_id` makes repeated onboarding
/// submissions update the existing row in place; the contact id the
/// session references never changes once set.
pub async fn upsert_lead_contact(
    db: &Database,
    contact: &LeadContact,
) -> Result<ContactId, AivyError> {
    let contact = contact.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO lead_contacts
                     (id, session_id, name, phone, email, organization, role,
                      created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
                 ON CONFLICT(session_id) DO UPDATE SET
                     name = excluded.name,
                     phone = excluded.phone,
                     email = excluded.email,
                     organization = excluded.organization,
                     role = excluded.role,
                     updated_at = excluded.updated_at",
                params![
                    contact.id,
                    contact.session_id,
                    contact.name,
                    contact.phone,
                    contact.email,
                    contact.organization,
                    contact.role,
                    contact.created_at,
                ],
            )?;
            let id: String = conn.query_row(
                "SELECT id FROM lead_contacts WHERE session_id = ?1",
                params![contact.session_id],
                |row| row.get(0),
            )?;
            Ok(ContactId(id))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the lead contact for a session, or `None` if none was captured yet.
pub async fn get_lead_contact(
    db: &Database,
    session_id: &str,
) -> Result<Option<LeadContact>, AivyError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM lead_contacts WHERE session_id = ?1"),
                params![session_id],
                row_to_contact,
            );
            match result {
                Ok(contact) => Ok(Some(contact)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::sessions::upsert_session;

    async fn setup_db_with_session() -> (Database, String) {
        let db = Database::open_in_memory().await.unwrap();
        let session = upsert_session(&db, "tok-contacts", None).await.unwrap();
        (db, session.id)
    }

    fn make_contact(id: &str, session_id: &str, name: &str, phone: &str) -> LeadContact {
        LeadContact {
            id: id.to_string(),
            session_id: session_id.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            email: None,
            organization: None,
            role: None,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn upsert_and_get_contact_roundtrips() {
        let (db, session_id) = setup_db_with_session().await;
        let contact = make_contact("c1", &session_id, "Dana Osei", "555-0100");

        let id = upsert_lead_contact(&db, &contact).await.unwrap();
        assert_eq!(id.0, "c1");

        let retrieved = get_lead_contact(&db, &session_id).await.unwrap().unwrap();
        assert_eq!(retrieved.name, "Dana Osei");
        assert_eq!(retrieved.phone, "555-0100");
    }

    #[tokio::test]
    async fn get_contact_for_session_without_one_returns_none() {
        let (db, session_id) = setup_db_with_session().await;
        assert!(get_lead_contact(&db, &session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn repeated_upsert_keeps_original_id_and_updates_fields() {
        let (db, session_id) = setup_db_with_session().await;

        let first = make_contact("c-first", &session_id, "Dana Osei", "555-0100");
        let first_id = upsert_lead_contact(&db, &first).await.unwrap();

        // Second submission for the same session with a new candidate id.
        let mut second = make_contact("c-second", &session_id, "Dana A. Osei", "555-0199");
        second.email = Some("dana@example.edu".to_string());
        let second_id = upsert_lead_contact(&db, &second).await.unwrap();

        assert_eq!(first_id, second_id, "session keeps its original contact id");

        let retrieved = get_lead_contact(&db, &session_id).await.unwrap().unwrap();
        assert_eq!(retrieved.id, "c-first");
        assert_eq!(retrieved.name, "Dana A. Osei");
        assert_eq!(retrieved.phone, "555-0199");
        assert_eq!(retrieved.email, Some("dana@example.edu".to_string()));
    }
}
