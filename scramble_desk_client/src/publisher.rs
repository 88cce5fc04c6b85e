use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use group_sheet::{render_sheet, Sheet, SheetKind, SheetPerson};
use scramble_desk::{Config, DeskError, Group, Person, Publisher, Result};
use tracing::info;

use crate::process::run;

/// Builds the display sheet for a group. `avatar` picks the image shown next to each person.
pub fn sheet_for(group: &Group, kind: SheetKind, row_multiplier: usize, avatar: impl Fn(&Person) -> Option<PathBuf>) -> Sheet {
    let people = |persons: &[Person]| persons.iter()
        .map(|p| SheetPerson { name: p.name.clone(), wca_id: p.wca_id.clone(), avatar: avatar(p) })
        .collect();
    Sheet {
        kind,
        event_name: group.short_event_name(),
        competitors: people(&group.competitors),
        staff: people(&group.staff),
        row_multiplier,
    }
}

/// Renders sheets locally and pushes files to the display server over mutual TLS.
pub struct StagePublisher {
    config: Config,
}

impl StagePublisher {
    pub fn new(config: Config) -> Self {
        StagePublisher { config }
    }

    async fn upload(&self, file: &Path, url: &str) -> Result<()> {
        let mut form = OsString::from("file=@");
        form.push(file);
        run("curl", [
            OsString::from("--fail"),
            OsString::from("--silent"),
            OsString::from("--show-error"),
            OsString::from("--cert"), self.config.client_cert().into(),
            OsString::from("--key"), self.config.client_key().into(),
            OsString::from("--cacert"), self.config.ca_cert().into(),
            OsString::from("-F"), form,
            OsString::from(url),
        ]).await?;
        info!(file = %file.display(), url, "uploaded");
        Ok(())
    }

    async fn show_sheet(&self, group: &Group, kind: SheetKind) -> Result<()> {
        let sheet = sheet_for(group, kind, self.config.policy.sheet_row_multiplier, |person| {
            self.config.avatar_image(person.wca_id.as_deref())
        });
        let pdf = render_sheet(&sheet).map_err(|err| DeskError::ExternalFailure(err.to_string()))?;
        let path = self.config.profiles_sheet();
        tokio::fs::write(&path, pdf).await?;
        self.upload(&path, &self.config.competitor_list_url()?).await
    }
}

#[async_trait]
impl Publisher for StagePublisher {
    async fn show_round_sheet(&self, group: &Group) -> Result<()> {
        self.show_sheet(group, SheetKind::Round).await
    }

    async fn show_hand_in_sheet(&self, group: &Group) -> Result<()> {
        self.show_sheet(group, SheetKind::HandIn).await?;
        println!("Hand-in opened for {}", group.short_event_name());
        Ok(())
    }

    async fn show_intermission(&self) -> Result<()> {
        self.upload(&self.config.intermission_template(), &self.config.scramble_url()?).await
    }

    async fn show_scramble_set(&self, competition_name: &str, group: &Group) -> Result<()> {
        let encrypted = self.config.scramble_dir(competition_name).join(format!("{}.pdf", group.scramble_set()));
        if !encrypted.is_file() {
            return Err(DeskError::NotFound(format!("scramble set {}", encrypted.display())));
        }
        let active = self.config.active_scramble_set();
        let mut password = OsString::from("--password=");
        password.push(&group.unlock_code);
        run("qpdf", [
            password,
            OsString::from("--decrypt"),
            encrypted.into_os_string(),
            active.clone().into_os_string(),
        ]).await?;
        self.upload(&active, &self.config.scramble_url()?).await?;
        println!("Opened {}", group.scramble_set());
        Ok(())
    }
}
