use async_graphql::{InputObject, ID};

use infra::repos::{CreateGuest, GroupDetails};

#[derive(InputObject)]
pub struct NewGroupMemberInput {
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_child: Option<bool>,
}

impl From<NewGroupMemberInput> for CreateGuest {
    fn from(input: NewGroupMemberInput) -> Self {
        Self {
            group_id: None,
            title: input.title,
            first_name: input.first_name,
            last_name: input.last_name,
            suffix: input.suffix,
            email: input.email,
            phone: input.phone,
            is_child: input.is_child.unwrap_or(false),
        }
    }
}

#[derive(InputObject)]
pub struct CreateGroupInput {
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[graphql(default)]
    pub guests: Vec<NewGroupMemberInput>,
}

/// Omitted fields are left alone; an empty string clears the field.
#[derive(InputObject)]
pub struct UpdateGroupInput {
    pub id: ID,
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CreateGroupInput {
    pub fn into_parts(self) -> (GroupDetails, Vec<CreateGuest>) {
        let details = GroupDetails {
            name: self.name,
            address_line1: self.address_line1,
            address_line2: self.address_line2,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
            email: self.email,
            phone: self.phone,
        };
        let members = self.guests.into_iter().map(CreateGuest::from).collect();
        (details, members)
    }
}

impl UpdateGroupInput {
    pub fn patch(self) -> GroupDetails {
        GroupDetails {
            name: self.name,
            address_line1: self.address_line1,
            address_line2: self.address_line2,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
            email: self.email,
            phone: self.phone,
        }
    }
}
