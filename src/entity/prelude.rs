//! 预导入模块，方便使用

pub use super::answered::{
    ActiveModel as AnsweredActiveModel, Entity as Answered, Model as AnsweredModel,
};
pub use super::assessors::{
    ActiveModel as AssessorActiveModel, Entity as Assessors, Model as AssessorModel,
};
pub use super::drills::{ActiveModel as DrillActiveModel, Entity as Drills, Model as DrillModel};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::trainee_drills::{
    ActiveModel as TraineeDrillActiveModel, Entity as TraineeDrills, Model as TraineeDrillModel,
};
pub use super::trainees::{
    ActiveModel as TraineeActiveModel, Entity as Trainees, Model as TraineeModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
