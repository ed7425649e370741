// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type SearchFieldPath = &'static str;

pub const SEARCH_FIELD_ARCHIVE: SearchFieldPath = "sp_archive";
pub const SEARCH_FIELD_CATEGORY: SearchFieldPath = "sp_category_path";
pub const SEARCH_FIELD_CONTENT_SECTION_TYPE: SearchFieldPath = "sp_contenttype";
pub const SEARCH_FIELD_CONTENT_TYPE: SearchFieldPath = "contenttype";
pub const SEARCH_FIELD_DATE: SearchFieldPath = "sp_date";
pub const SEARCH_FIELD_DATE_LIST: SearchFieldPath = "sp_date_list";
pub const SEARCH_FIELD_GEO_POINTS: SearchFieldPath = "sp_geo_points";
pub const SEARCH_FIELD_GROUP: SearchFieldPath = "sp_group_path";
pub const SEARCH_FIELD_NATURAL_SORT: SearchFieldPath = "sp_natural_sort";
pub const SEARCH_FIELD_OBJECT_TYPE: SearchFieldPath = "sp_objecttype";
pub const SEARCH_FIELD_SITE: SearchFieldPath = "sp_site";
pub const SEARCH_FIELD_SORT_VALUE: SearchFieldPath = "sp_sortvalue";
pub const SEARCH_FIELD_SOURCE: SearchFieldPath = "sp_source";

/// Default target of date range filters and facets
pub const DEFAULT_DATE_RANGE_FIELD: SearchFieldPath = SEARCH_FIELD_DATE_LIST;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Well-known backend fields that field filters and facets can target by a
/// dedicated discriminator tag instead of the generic `field` one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSpecialization {
    Category,
    ContentSectionType,
    ContentType,
    Group,
    ObjectType,
    Site,
    Source,
}

impl FieldSpecialization {
    pub const ALL: [FieldSpecialization; 7] = [
        Self::Category,
        Self::ContentSectionType,
        Self::ContentType,
        Self::Group,
        Self::ObjectType,
        Self::Site,
        Self::Source,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::ContentSectionType => "contentSectionType",
            Self::ContentType => "contentType",
            Self::Group => "group",
            Self::ObjectType => "objectType",
            Self::Site => "site",
            Self::Source => "source",
        }
    }

    pub fn field(self) -> SearchFieldPath {
        match self {
            Self::Category => SEARCH_FIELD_CATEGORY,
            Self::ContentSectionType => SEARCH_FIELD_CONTENT_SECTION_TYPE,
            Self::ContentType => SEARCH_FIELD_CONTENT_TYPE,
            Self::Group => SEARCH_FIELD_GROUP,
            Self::ObjectType => SEARCH_FIELD_OBJECT_TYPE,
            Self::Site => SEARCH_FIELD_SITE,
            Self::Source => SEARCH_FIELD_SOURCE,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }

    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.field() == field)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
