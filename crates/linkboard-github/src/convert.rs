//! Wire-to-domain conversions.

use linkboard_core::{CreatedIssue, LabelSet, RawIssue};

use crate::types::{CreatedDto, IssueDto};

pub(crate) fn raw_issue_from_dto(dto: IssueDto) -> RawIssue {
    let labels: LabelSet = dto.labels.into_iter().map(|label| label.name).collect();
    RawIssue {
        id: dto.id,
        number: dto.number,
        title: dto.title,
        body: dto.body.unwrap_or_default(),
        labels,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
        url: dto.html_url,
    }
}

pub(crate) fn created_issue_from_dto(dto: CreatedDto) -> CreatedIssue {
    CreatedIssue {
        id: dto.id,
        number: dto.number,
        url: dto.html_url,
    }
}
